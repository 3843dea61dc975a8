//! Backend communication with the speech synthesis server.
//!
//! Provides the [`Backend`] trait the pipeline synthesizes through and an
//! HTTP implementation that streams audio back chunk by chunk.

mod client;
mod stream;
mod types;

pub use client::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT, HttpBackend};
pub use stream::{ChunkStream, MAX_CHUNK_SIZE};
pub use types::{AudioChunk, AudioStream, DEFAULT_AUDIO_FORMAT, SynthesisError, SynthesizeRequest};

use std::time::Duration;

/// Trait for speech synthesis backends.
///
/// This trait abstracts the network call to the TTS server, allowing for
/// mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Start synthesizing `request.text`.
    ///
    /// # Returns
    /// A lazy stream of audio chunks in playback order. Errors may surface
    /// either here, before any audio, or as an item of the stream.
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<AudioStream, SynthesisError>;
}

/// Create an HTTP backend for the given address.
pub fn create_backend(address: &str, timeout: Duration) -> Result<HttpBackend, SynthesisError> {
    HttpBackend::new(address, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::Prosody;
    use mockito::Matcher;

    fn request(text: &str) -> SynthesizeRequest {
        SynthesizeRequest::new(text, "hi-IN-MadhurNeural", &Prosody::default())
    }

    fn collect(stream: AudioStream) -> Result<Vec<u8>, SynthesisError> {
        let mut bytes = Vec::new();
        for chunk in stream {
            bytes.extend_from_slice(chunk?.as_bytes());
        }
        Ok(bytes)
    }

    // ===========================================
    // Backend trait tests with mocks
    // ===========================================

    #[test]
    fn test_mock_backend_synthesize() {
        let mut mock = MockBackend::new();

        mock.expect_synthesize()
            .withf(|req| req.text == "Hello world" && req.voice == "hi-IN-MadhurNeural")
            .times(1)
            .returning(|_| {
                let chunks = vec![
                    Ok(AudioChunk::new(b"ID3".to_vec())),
                    Ok(AudioChunk::new(b"\xff\xfb".to_vec())),
                ];
                let stream: AudioStream = Box::new(chunks.into_iter());
                Ok(stream)
            });

        let audio = collect(mock.synthesize(&request("Hello world")).unwrap()).unwrap();
        assert_eq!(audio, b"ID3\xff\xfb");
    }

    #[test]
    fn test_mock_backend_failure() {
        let mut mock = MockBackend::new();

        mock.expect_synthesize()
            .times(1)
            .returning(|_| Err(SynthesisError::Timeout));

        let result = mock.synthesize(&request("Hello"));
        assert!(matches!(result, Err(SynthesisError::Timeout)));
    }

    // ===========================================
    // HttpBackend tests against a local server
    // ===========================================

    #[test]
    fn test_create_backend_adds_scheme() {
        let backend = create_backend("localhost:5050", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5050");
    }

    #[test]
    fn test_create_backend_keeps_full_url() {
        let backend = create_backend("https://tts.example.com/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(backend.base_url(), "https://tts.example.com");
    }

    #[test]
    fn test_http_synthesize_streams_body() {
        let mut server = mockito::Server::new();
        let body: Vec<u8> = (0..40_000u32).map(|i| (i % 251) as u8).collect();

        let mock = server
            .mock("POST", "/synthesize")
            .match_body(Matcher::Json(serde_json::json!({
                "text": "Hello world",
                "voice": "hi-IN-MadhurNeural",
                "rate": "+10%",
                "pitch": "+0Hz",
                "format": "audio-24khz-48kbitrate-mono-mp3"
            })))
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(body.clone())
            .create();

        let backend = create_backend(&server.url(), DEFAULT_TIMEOUT).unwrap();
        let stream = backend.synthesize(&request("Hello world")).unwrap();

        assert_eq!(collect(stream).unwrap(), body);
        mock.assert();
    }

    #[test]
    fn test_http_synthesize_error_status() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/synthesize")
            .with_status(503)
            .with_body("voice unavailable")
            .create();

        let backend = create_backend(&server.url(), DEFAULT_TIMEOUT).unwrap();
        let result = backend.synthesize(&request("Hello"));

        match result {
            Err(SynthesisError::RequestFailed(msg)) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("voice unavailable"));
            }
            other => panic!("expected RequestFailed, got {:?}", other.err()),
        }
        mock.assert();
    }

    #[test]
    fn test_http_synthesize_rejects_non_audio_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/synthesize")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"quota"}"#)
            .create();

        let backend = create_backend(&server.url(), DEFAULT_TIMEOUT).unwrap();
        let result = backend.synthesize(&request("Hello"));

        assert!(matches!(result, Err(SynthesisError::InvalidResponse(_))));
    }

    #[test]
    fn test_http_synthesize_empty_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/synthesize")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .create();

        let backend = create_backend(&server.url(), DEFAULT_TIMEOUT).unwrap();
        let stream = backend.synthesize(&request("Hello")).unwrap();

        assert!(matches!(collect(stream), Err(SynthesisError::EmptyStream)));
    }

    #[test]
    fn test_http_synthesize_connection_refused() {
        let backend = create_backend("http://127.0.0.1:1", DEFAULT_TIMEOUT).unwrap();
        let result = backend.synthesize(&request("Hello"));

        assert!(matches!(result, Err(SynthesisError::ConnectionFailed(_))));
    }

    #[test]
    fn test_http_synthesize_stalled_server_times_out() {
        // Accepted by the kernel backlog but never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let backend = create_backend(&address, Duration::from_secs(1)).unwrap();
        let started = std::time::Instant::now();
        let result = backend.synthesize(&request("Hello"));

        assert!(matches!(result, Err(SynthesisError::Timeout)));
        assert!(started.elapsed() < Duration::from_secs(10));
        drop(listener);
    }
}
