//! Successful response wrapper

/// Decoded body of a successful call together with the status it came with
///
/// The worker uses the status to tell apart outcomes that share a body shape,
/// e.g. `PUT /connectors/{name}/config` answers 201 when it created the
/// connector and 200 when it updated an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Decoded body
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            data: f(self.data),
        }
    }
}

impl<T> std::ops::Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}
