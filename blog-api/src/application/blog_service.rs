use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::info;

use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::data::category_repository::CategoryRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::blog::{Blog, CategorySummary, CreateBlogRequest, PopulatedBlog, UpdateBlogRequest};
use crate::domain::error::DomainError;
use crate::domain::user::Actor;

pub(crate) struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
}

impl BlogService {
    pub(crate) fn new(
        blogs: Arc<dyn BlogRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            blogs,
            categories,
            users,
        }
    }

    pub(crate) async fn list_blogs(&self) -> Result<Vec<PopulatedBlog>, DomainError> {
        let blogs = self.blogs.list_blogs().await?;
        self.populate(blogs).await
    }

    pub(crate) async fn get_blog(&self, id: i64) -> Result<PopulatedBlog, DomainError> {
        let blog = self.find_blog(id).await?;
        self.populate_one(blog).await
    }

    pub(crate) async fn create_blog(
        &self,
        author_id: i64,
        req: CreateBlogRequest,
    ) -> Result<PopulatedBlog, DomainError> {
        let req = req.validate()?;
        self.ensure_category_exists(req.category_id).await?;

        let blog = self
            .blogs
            .create_blog(NewBlog {
                title: req.title,
                content: req.content,
                category_id: req.category_id,
                author_id,
            })
            .await?;

        info!(blog_id = blog.id, author_id, "blog created");
        self.populate_one(blog).await
    }

    pub(crate) async fn update_blog(
        &self,
        actor: Actor,
        id: i64,
        req: UpdateBlogRequest,
    ) -> Result<PopulatedBlog, DomainError> {
        let existing = self.find_blog(id).await?;
        ensure_can_manage(&actor, &existing)?;

        if let Some(category_id) = req.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let merged = existing.apply(req)?;
        let updated = self
            .blogs
            .update_blog(
                id,
                BlogPatch {
                    title: merged.title,
                    content: merged.content,
                    category_id: merged.category_id,
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("Blog"))?;

        self.populate_one(updated).await
    }

    pub(crate) async fn delete_blog(&self, actor: Actor, id: i64) -> Result<(), DomainError> {
        let existing = self.find_blog(id).await?;
        ensure_can_manage(&actor, &existing)?;

        if !self.blogs.delete_blog(id).await? {
            return Err(DomainError::not_found("Blog"));
        }

        info!(blog_id = id, actor_id = actor.user_id, "blog deleted");
        Ok(())
    }

    pub(crate) async fn list_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<PopulatedBlog>, DomainError> {
        self.ensure_category_exists(category_id).await?;
        let blogs = self.blogs.list_by_category(category_id).await?;
        self.populate(blogs).await
    }

    async fn find_blog(&self, id: i64) -> Result<Blog, DomainError> {
        self.blogs
            .get_blog(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blog"))
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<(), DomainError> {
        match self.categories.get_category(category_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Category")),
        }
    }

    async fn populate_one(&self, blog: Blog) -> Result<PopulatedBlog, DomainError> {
        self.populate(vec![blog])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Unexpected("population dropped a blog".to_string()))
    }

    /// Resolves author and category references with one lookup per
    /// referenced collection.
    async fn populate(&self, blogs: Vec<Blog>) -> Result<Vec<PopulatedBlog>, DomainError> {
        if blogs.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<i64> = blogs
            .iter()
            .map(|b| b.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let category_ids: Vec<i64> = blogs
            .iter()
            .map(|b| b.category_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let authors: HashMap<i64, _> = self
            .users
            .find_authors(&author_ids)
            .await?
            .into_iter()
            .map(|author| (author.id, author))
            .collect();
        let categories: HashMap<i64, CategorySummary> = self
            .categories
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, CategorySummary { id: c.id, name: c.name }))
            .collect();

        Ok(blogs
            .into_iter()
            .map(|blog| PopulatedBlog {
                author: authors.get(&blog.author_id).cloned(),
                category: categories.get(&blog.category_id).cloned(),
                blog,
            })
            .collect())
    }
}

fn ensure_can_manage(actor: &Actor, blog: &Blog) -> Result<(), DomainError> {
    if actor.is_admin() || blog.is_authored_by(actor.user_id) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
