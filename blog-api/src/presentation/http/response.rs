use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DataResponse<T> {
    pub(crate) success: bool,
    pub(crate) data: T,
}

impl<T> DataResponse<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListResponse<T> {
    pub(crate) success: bool,
    pub(crate) count: usize,
    pub(crate) data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub(crate) fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub(crate) success: bool,
    pub(crate) message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
