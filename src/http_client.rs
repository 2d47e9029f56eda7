//! HTTP agent construction and bounded response helpers.

use std::io::{self, Read};

use crate::config::ServiceSettings;

/// Build an agent with the timeouts configured for the prediction service.
pub(crate) fn build_agent(settings: &ServiceSettings) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(settings.connect_timeout())
        .timeout_read(settings.read_timeout())
        .timeout_write(settings.write_timeout())
        .build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let reader = response.into_reader();
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

/// Read a response body as UTF-8 text within the size limit.
pub(crate) fn read_response_text(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    let bytes = read_response_bytes(response, max_bytes)?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Accept one connection, wait for the request, then write `reply` after `delay`.
    fn reply_after(delay: Duration, reply: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request);
            thread::sleep(delay);
            let _ = stream.write_all(&reply);
        });
        format!("http://{addr}/predict")
    }

    fn json_reply(body: &[u8]) -> Vec<u8> {
        let mut reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
            body.len()
        )
        .into_bytes();
        reply.extend_from_slice(body);
        reply
    }

    fn settings(read_timeout_secs: u64) -> ServiceSettings {
        ServiceSettings {
            connect_timeout_secs: 2,
            read_timeout_secs,
            write_timeout_secs: 2,
            ..ServiceSettings::default()
        }
    }

    #[test]
    fn prediction_body_within_limit_is_returned_as_text() {
        let body = br#"{"prediction":1,"probability":0.82}"#;
        let url = reply_after(Duration::ZERO, json_reply(body));
        let response = build_agent(&settings(5)).post(&url).call().unwrap();
        let text = read_response_text(response, body.len()).unwrap();
        assert_eq!(text.as_bytes(), body);
    }

    #[test]
    fn declared_length_over_limit_is_rejected_before_reading() {
        let url = reply_after(Duration::ZERO, json_reply(&[b' '; 512]));
        let response = build_agent(&settings(5)).post(&url).call().unwrap();
        let err = read_response_text(response, 128).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("512 bytes"));
    }

    #[test]
    fn non_utf8_body_is_invalid_data() {
        let url = reply_after(Duration::ZERO, json_reply(&[0xff, 0xfe]));
        let response = build_agent(&settings(5)).post(&url).call().unwrap();
        let err = read_response_text(response, 64).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn read_timeout_comes_from_service_settings() {
        let url = reply_after(Duration::from_secs(3), json_reply(b"{}"));
        let err = build_agent(&settings(1)).post(&url).call().unwrap_err();
        assert!(matches!(err, ureq::Error::Transport(_)), "{err:?}");
    }
}
