use h1_adapter::{
    Error, ResponseAdapter,
    h1::{BodyOptions, Request},
    http::StatusCode,
};
use std::io;
use tokio::net::{TcpListener, TcpStream};

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let addr = std::env::var("ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());
    let io = TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");

    loop {
        match io.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(connection(stream));
            }
            Err(err) => {
                log::error!("failed to accept peer: {err}");
            }
        }
    }
}

async fn connection(mut stream: TcpStream) {
    let mut buffer = Default::default();

    loop {
        let req = Request::with_buffer(&mut stream, buffer);
        match handle(req).await {
            Ok(req) => match req.finish() {
                Some(leftover) => buffer = leftover,
                None => break,
            },
            Err(Error::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => {
                log::error!("{err}");
                break;
            }
        }
    }
}

// ===== Handler =====

async fn handle<A: ResponseAdapter>(req: A) -> Result<A, Error> {
    let (head, req) = req.read_headers().await?;
    log::info!("> {} {} {}", head.method, head.path, req.protocol_version());

    let options = BodyOptions::default().max_length(64 * 1024);
    let (body, req) = req.read_body(&options).await?;
    if !body.is_done() {
        return req
            .send_response(StatusCode::CONTENT_TOO_LARGE, &[("connection", "close")], b"")
            .await;
    }
    let body = body.into_bytes();

    match head.path.as_str() {
        "/stream" => {
            let mut req = req
                .open_chunked(StatusCode::OK, &[("content-type", "text/plain")])
                .await?;
            for line in ["streaming\n", "over\n", "http/1\n"] {
                req = req.write_chunk(line.as_bytes()).await?;
            }
            req.write_chunk(b"").await
        }
        "/echo" => {
            req.send_response(StatusCode::OK, &[("content-type", "application/octet-stream")], &body)
                .await
        }
        _ => {
            let peer = match req.peer_info() {
                Ok(addr) => addr.to_string(),
                Err(_) => "unknown".into(),
            };
            let message = format!("Hello {peer}\n");
            req.send_response(StatusCode::OK, &[("content-type", "text/plain")], message.as_bytes())
                .await
        }
    }
}
