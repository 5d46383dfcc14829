use crate::error::TransportError;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP client used to reach the prediction server.
pub trait Transport {
    fn post_form(&mut self, url: &str, body: &str) -> Result<HttpResponse, TransportError>;
}

pub trait NetworkLink {
    fn is_online(&self) -> bool;

    /// Tries once to bring a dropped link back. Returns whether it is online afterwards.
    fn reconnect(&mut self) -> bool {
        self.is_online()
    }
}

/// Link of a host without network access.
pub struct Offline;

impl NetworkLink for Offline {
    fn is_online(&self) -> bool {
        false
    }
}

/// Appends a received chunk unless the body would grow past `limit` bytes.
pub fn append_capped(body: &mut Vec<u8>, chunk: &[u8], limit: usize) -> Result<(), TransportError> {
    if body.len() + chunk.len() > limit {
        return Err(TransportError::new(
            -1,
            format!("Response body larger than {limit} bytes"),
        ));
    }
    body.extend_from_slice(chunk);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub use self::esp::EspHttpTransport;

#[cfg(target_os = "espidf")]
mod esp {
    use embedded_svc::http::client::Client;
    use embedded_svc::http::Status;
    use embedded_svc::io::{Read, Write};
    use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
    use esp_idf_svc::io::EspIOError;
    use log::debug;

    use super::{append_capped, HttpResponse, Transport, FORM_CONTENT_TYPE};
    use crate::configuration::main_configuration::{HTTP_TIMEOUT, MAX_RESPONSE_BYTES};
    use crate::error::TransportError;

    const READ_CHUNK_SIZE: usize = 256;

    fn to_transport_error(context: &str, e: EspIOError) -> TransportError {
        TransportError::new(e.0.code(), format!("{context}: {e}"))
    }

    pub struct EspHttpTransport {
        configuration: Configuration,
    }

    impl EspHttpTransport {
        pub fn new() -> Self {
            Self {
                configuration: Configuration {
                    timeout: Some(HTTP_TIMEOUT),
                    ..Default::default()
                },
            }
        }
    }

    impl Default for EspHttpTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for EspHttpTransport {
        fn post_form(&mut self, url: &str, body: &str) -> Result<HttpResponse, TransportError> {
            let connection = EspHttpConnection::new(&self.configuration)
                .map_err(|e| TransportError::new(e.code(), format!("Connection setup: {e}")))?;
            let mut client = Client::wrap(connection);

            let content_length = body.len().to_string();
            let headers = [
                ("Content-Type", FORM_CONTENT_TYPE),
                ("Content-Length", content_length.as_str()),
            ];

            let mut request = client
                .post(url, &headers)
                .map_err(|e| to_transport_error("Request", e))?;
            request
                .write_all(body.as_bytes())
                .map_err(|e| to_transport_error("Write body", e))?;
            request
                .flush()
                .map_err(|e| to_transport_error("Flush body", e))?;

            let mut response = request
                .submit()
                .map_err(|e| to_transport_error("Submit", e))?;
            let status = response.status();

            let mut raw = Vec::new();
            let mut chunk = [0u8; READ_CHUNK_SIZE];
            loop {
                let read = response
                    .read(&mut chunk)
                    .map_err(|e| to_transport_error("Read body", e))?;
                if read == 0 {
                    break;
                }
                append_capped(&mut raw, &chunk[..read], MAX_RESPONSE_BYTES)?;
            }
            debug!("Received {} bytes with HTTP {status}", raw.len());

            Ok(HttpResponse {
                status,
                body: String::from_utf8_lossy(&raw).into_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_is_success() {
        let response = |status| HttpResponse {
            status,
            body: String::new(),
        };

        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(301).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn offline_link_is_never_online() {
        let mut link = Offline;

        assert!(!link.is_online());
        assert!(!link.reconnect());
    }

    #[test]
    fn body_is_collected_up_to_the_limit() {
        let mut body = Vec::new();

        append_capped(&mut body, b"{\"membutuhkan", 17).unwrap();
        append_capped(&mut body, b"_sir", 17).unwrap();

        assert_eq!(body, b"{\"membutuhkan_sir");
    }

    #[test]
    fn oversized_body_is_a_transport_error() {
        let mut body = vec![b' '; 4090];

        let err = append_capped(&mut body, &[b' '; 7], 4096).unwrap_err();

        assert_eq!(err.code, -1);
        assert!(err.reason.contains("4096"));
        assert_eq!(body.len(), 4090);
    }
}
