use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponseDto {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
}
