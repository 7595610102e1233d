use std::sync::Arc;
use std::time::Duration;

use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, error};

use crate::factory::Factory;
use crate::serialization::{deserialize_config, serialize_config};

use super::request::{parse_http_request, Request};

const NOT_FOUND: &str = "HTTP/1.1 404 NOT FOUND\r\n\r\n";
const INTERNAL_SERVER_ERROR: &str = "HTTP/1.1 500 INTERNAL SERVER ERROR\r\n\r\n";

const CORS_HEADERS: &str = "Access-Control-Allow-Origin: *\r\n\
Access-Control-Allow-Methods: GET, OPTIONS\r\n\
Access-Control-Allow-Headers: *\r\n";

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        410 => "Gone",
        418 => "I'm a teapot",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown",
    }
}

async fn read_http_request(stream: &mut TcpStream) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    // Read until we find the header terminator. Resource routes are GET
    // only, so there is never a body to wait for.
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if data.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }
    Ok(data)
}

async fn write_response(
    stream: &mut TcpStream,
    status: u16,
    extra_headers: &[(String, String)],
    body: &[u8],
) -> io::Result<()> {
    let mut response = format!("HTTP/1.1 {} {}\r\n", status, reason_phrase(status));
    response.push_str(CORS_HEADERS);
    for (key, value) in extra_headers {
        response.push_str(&format!("{}: {}\r\n", key, value));
    }
    response.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));

    stream.write_all(response.as_bytes()).await?;
    stream.write_all(body).await
}

async fn respond(stream: &mut TcpStream, req: &Request, factory: &Factory) -> io::Result<()> {
    if factory.kind_for_route(&req.path).is_none() {
        return stream.write_all(NOT_FOUND.as_bytes()).await;
    }

    let config = req
        .query_params
        .get("config")
        .and_then(|serialized| deserialize_config(serialized));
    let Some(config) = config else {
        debug!("no valid config for {}", req.path);
        return stream.write_all(INTERNAL_SERVER_ERROR.as_bytes()).await;
    };

    let (fetch_delay, redirect_count, status_code) = match config.network() {
        Some(network) => (
            network.fetch_delay(),
            network.redirect_count(),
            network.status_code(),
        ),
        None => (0, 0, 200),
    };

    if fetch_delay > 0 {
        tokio::time::sleep(Duration::from_millis(fetch_delay)).await;
    }

    // Emit one hop of the redirect chain: same path, same config, with the
    // counter decremented.
    if redirect_count > 0 {
        let mut next = config.clone();
        if let Some(network) = next.network_mut() {
            network.redirect_count = Some(redirect_count - 1);
        }
        let location = format!(
            "{}?config={}",
            req.path,
            urlencoding::encode(&serialize_config(&next))
        );
        return write_response(stream, 302, &[("Location".to_string(), location)], b"").await;
    }

    let response = match factory.create(&config) {
        Ok(response) => response,
        Err(err) => {
            error!("factory error: {}", err);
            return stream.write_all(INTERNAL_SERVER_ERROR.as_bytes()).await;
        }
    };
    let body = match factory.inject_bytes(&config, response.body) {
        Ok(body) => body,
        Err(err) => {
            error!("byte injection error: {}", err);
            return stream.write_all(INTERNAL_SERVER_ERROR.as_bytes()).await;
        }
    };

    let headers: Vec<(String, String)> = response
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    write_response(stream, status_code, &headers, body.as_bytes()).await
}

pub async fn handle_client(mut stream: TcpStream, factory: &Arc<Factory>) -> io::Result<()> {
    let data = read_http_request(&mut stream).await?;
    let req = parse_http_request(&data);

    // Handle CORS preflight requests with a very permissive policy: the
    // whole point of multi-origin configs is cross-origin fetches.
    if req.method.eq_ignore_ascii_case("OPTIONS") {
        let preflight = format!("HTTP/1.1 204 No Content\r\n{}\r\n", CORS_HEADERS);
        return stream.write_all(preflight.as_bytes()).await;
    }

    respond(&mut stream, &req, factory).await
}
