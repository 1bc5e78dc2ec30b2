// Chunked JSON streaming utilities
use crate::domain::telemetry::TelemetryMessage;
use crate::infrastructure::http_response::brotli_compress;
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::Stream;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

/// Create a chunked response carrying one frame per message.
///
/// Uncompressed frames are newline-delimited JSON. Compressed frames are
/// individually Brotli-encoded and prefixed with a 4-byte big-endian length.
pub fn chunked_json_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = TelemetryMessage> + Send + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_chunk(msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed individually, so no Content-Encoding on the response
    let content_type = if compress {
        "application/octet-stream"
    } else {
        "application/x-ndjson"
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single message to a chunk
async fn serialize_chunk(msg: TelemetryMessage, compress: bool) -> Result<Bytes, std::io::Error> {
    let mut json = serde_json::to_vec(&msg).map_err(std::io::Error::other)?;

    if !compress {
        json.push(b'\n');
        return Ok(Bytes::from(json));
    }

    let payload = brotli_compress(json).await?;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(payload.len() as u32);
    chunk.put_slice(&payload);
    Ok(chunk.freeze())
}

/// Stream broadcast telemetry, skipping over messages a slow reader missed
pub fn stream_from_receiver(
    rx: broadcast::Receiver<TelemetryMessage>,
    compress: bool,
) -> impl IntoResponse {
    let stream = BroadcastStream::new(rx).filter_map(|item| async move {
        match item {
            Ok(msg) => Some(msg),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!("Telemetry stream lagged, skipped {} messages", skipped);
                None
            }
        }
    });

    match chunked_json_stream(stream, compress) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::TelemetrySample;

    #[tokio::test]
    async fn test_plain_chunk_is_json_line() {
        let chunk = serialize_chunk(TelemetryMessage::Sample(TelemetrySample::at_rest(5)), false)
            .await
            .unwrap();
        assert_eq!(chunk.last(), Some(&b'\n'));

        let value: serde_json::Value = serde_json::from_slice(&chunk[..chunk.len() - 1]).unwrap();
        assert_eq!(value["type"], "sample");
        assert_eq!(value["timestamp"], 5);
    }

    #[tokio::test]
    async fn test_compressed_chunk_is_length_prefixed() {
        let chunk = serialize_chunk(TelemetryMessage::Sample(TelemetrySample::at_rest(5)), true)
            .await
            .unwrap();
        let declared = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
        assert_eq!(declared, chunk.len() - 4);
    }
}
