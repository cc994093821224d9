//! Domain methods for the file service client.
//!
//! Endpoints: `GET /api/upload/` (listing), `POST /api/upload/` (multipart,
//! repeated `file` parts) and `DELETE /api/delete/{id}/`.

use async_trait::async_trait;
use bytes::Bytes;
use mediashelf_core::{
    AppError, AppResult, CandidateFile, FileId, FileSource, RemoteFileService, StoredFile,
};
use reqwest::multipart::{Form, Part};

use crate::{ApiClient, API_PREFIX};

/// Multipart field every uploaded file is attached under
pub const UPLOAD_FIELD: &str = "file";

impl ApiClient {
    /// List every stored file
    pub async fn list_files(&self) -> AppResult<Vec<StoredFile>> {
        self.get(&format!("{}/upload/", API_PREFIX)).await
    }

    /// Upload a batch of candidates in a single multipart request
    pub async fn upload_files(&self, files: &[CandidateFile]) -> AppResult<()> {
        let mut form = Form::new();
        for file in files {
            form = form.part(UPLOAD_FIELD, build_part(file).await?);
        }

        tracing::debug!(count = files.len(), "Uploading batch");
        self.post_multipart(&format!("{}/upload/", API_PREFIX), form)
            .await
    }

    /// Delete a stored file by ID
    pub async fn delete_file(&self, id: &FileId) -> AppResult<()> {
        self.delete(&format!("{}/delete/{}/", API_PREFIX, id)).await
    }

    /// Download the bytes behind a (resolved) media URL
    pub async fn fetch_bytes(&self, url: &str) -> AppResult<Bytes> {
        self.get_bytes(url).await
    }
}

async fn build_part(file: &CandidateFile) -> AppResult<Part> {
    let data = match file.source() {
        FileSource::Path(path) => tokio::fs::read(path).await?,
        FileSource::Bytes(bytes) => bytes.to_vec(),
    };

    let part = Part::bytes(data).file_name(file.name().to_string());
    if file.mime_type().is_empty() {
        return Ok(part);
    }

    part.mime_str(file.mime_type()).map_err(|e| {
        AppError::InvalidInput(format!(
            "Invalid content type '{}' for {}: {}",
            file.mime_type(),
            file.name(),
            e
        ))
    })
}

#[async_trait]
impl RemoteFileService for ApiClient {
    async fn list(&self) -> AppResult<Vec<StoredFile>> {
        self.list_files().await
    }

    async fn create(&self, files: &[CandidateFile]) -> AppResult<()> {
        self.upload_files(files).await
    }

    async fn delete(&self, id: &FileId) -> AppResult<()> {
        self.delete_file(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediashelf_core::{ClientConfig, RenderStrategy};
    use mockito::Matcher;

    const LISTING: &str = r#"[
        {"id": 1, "file": "/media/uploads/cat.jpeg", "file_name": "cat.jpeg",
         "file_type": "jpeg", "file_size": 204800, "category": "image",
         "uploaded_at": "2024-03-01T10:15:30Z"},
        {"id": 2, "file": "http://cdn.example.com/song.mp3", "file_name": "song.mp3",
         "file_type": "mp3", "file_size": 512000, "category": "audio",
         "uploaded_at": "2024-03-02T08:00:00Z"}
    ]"#;

    async fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(&ClientConfig::new(server.url())).unwrap()
    }

    #[tokio::test]
    async fn list_files_parses_listing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/upload/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let files = client.list_files().await.unwrap();

        mock.assert_async().await;
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].id, FileId::new("1"));
        assert_eq!(files[0].render_strategy(), RenderStrategy::Image);
        assert_eq!(files[1].render_strategy(), RenderStrategy::Audio);
    }

    #[tokio::test]
    async fn list_files_bad_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/upload/")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server).await;
        let err = client.list_files().await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn upload_sends_every_file_under_the_same_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload/")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="a.png""#.to_string()),
                Matcher::Regex(r#"name="file"; filename="b.mp3""#.to_string()),
                Matcher::Regex("(?i)content-type: audio/mpeg".to_string()),
            ]))
            .with_status(201)
            .with_body("[]")
            .create_async()
            .await;

        let files = vec![
            CandidateFile::from_bytes("a.png", "image/png", Bytes::from_static(b"png-bytes")),
            CandidateFile::from_bytes("b.mp3", "audio/mpeg", Bytes::from_static(b"mp3-bytes")),
        ];

        let client = client_for(&server).await;
        client.upload_files(&files).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_rejected_by_server_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/upload/")
            .with_status(400)
            .with_body(r#"{"error": "Invalid file type or MIME type"}"#)
            .create_async()
            .await;

        let files = vec![CandidateFile::from_bytes(
            "a.png",
            "image/png",
            Bytes::from_static(b"x"),
        )];

        let client = client_for(&server).await;
        let err = client.upload_files(&files).await.unwrap_err();
        match err {
            AppError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid file type"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn upload_missing_path_fails_before_sending() {
        let server = mockito::Server::new_async().await;
        let files = vec![CandidateFile::new(
            "gone.png",
            200_000,
            "image/png",
            FileSource::Path("/definitely/not/here/gone.png".into()),
        )];

        let client = client_for(&server).await;
        let err = client.upload_files(&files).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn delete_file_hits_delete_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/delete/42/")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server).await;
        RemoteFileService::delete(&client, &FileId::new("42"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_missing_file_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/delete/9/")
            .with_status(404)
            .with_body(r#"{"error": "File not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let err = client.delete_file(&FileId::new("9")).await.unwrap_err();
        assert!(matches!(err, AppError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn fetch_bytes_returns_body_and_checks_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/media/uploads/cat.jpeg")
            .with_status(200)
            .with_body(b"jpeg-data".to_vec())
            .create_async()
            .await;
        server
            .mock("GET", "/media/uploads/missing.jpeg")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let data = client
            .fetch_bytes(&format!("{}/media/uploads/cat.jpeg", server.url()))
            .await
            .unwrap();
        assert_eq!(&data[..], b"jpeg-data");

        let err = client
            .fetch_bytes(&format!("{}/media/uploads/missing.jpeg", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Status { status: 404, .. }));
    }
}
