use std::io::Read;

use crate::body_reader::read_body;
use crate::config::Config;
use crate::error::{HandlerError, StoreError};
use crate::path_resolver::PathResolver;
use crate::request::CgiRequest;
use crate::response::Response;
use crate::store::FileStore;

pub const WELCOME_MESSAGE: &str = "Welcome to the Go CGI application!";

/// Routes one CGI request to the key-value store.
#[derive(Debug, Clone)]
pub struct Handler {
    config: Config,
    resolver: PathResolver,
    store: FileStore,
}

impl Handler {
    pub fn new(config: Config) -> Self {
        Self {
            resolver: PathResolver::new(config.storage_dir.clone()),
            store: FileStore::new(config.storage_dir.clone()),
            config,
        }
    }

    /// Handle `request`, reading its body from `body` only when a value is to be stored.
    pub fn handle<R: Read>(&self, request: &CgiRequest, body: &mut R) -> Response {
        let method = request.method();
        log::info!("{} {:?}", method, request.path_info);

        let result = match method.as_str() {
            "GET" => self.handle_get(request),
            "POST" => self.handle_post(request, body),
            _ => Err(HandlerError::MethodNotAllowed),
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                if e.is_server_fault() {
                    log::error!("{} {:?} failed: {:?}", method, request.path_info, e);
                } else {
                    log::info!("{} {:?} rejected: {}", method, request.path_info, e);
                }
                Response::from(e)
            }
        };
        log::info!("{} {:?} -> {}", method, request.path_info, response.status);

        response
    }

    fn handle_get(&self, request: &CgiRequest) -> Result<Response, HandlerError> {
        let key = request.key();
        if key.is_empty() {
            return Ok(Response::ok(WELCOME_MESSAGE));
        }

        let path = self.resolver.resolve(key)?;
        let value = self.store.get(&path)?;

        Ok(Response::ok(String::from_utf8_lossy(&value).into_owned()))
    }

    fn handle_post<R: Read>(&self, request: &CgiRequest, body: &mut R) -> Result<Response, HandlerError> {
        let declared_length = self.declared_length(request)?;
        if !request.has_text_content_type() {
            return Err(HandlerError::UnsupportedMediaType);
        }

        let key = request.key();
        if key.trim().is_empty() {
            return Err(HandlerError::MissingKey);
        }

        let path = self.resolver.resolve(key)?;
        // Refuse duplicates before consuming the stream
        if self.store.contains(&path) {
            return Err(StoreError::KeyExists.into());
        }

        let received = read_body(body, declared_length)?;
        self.store.put(&path, &received.last_chunk)?;

        Ok(Response::created(format!(
            "Bytes received: {}\nStored key: {}",
            received.bytes_received, key
        )))
    }

    // Length checks that must pass before the body stream is touched.
    fn declared_length(&self, request: &CgiRequest) -> Result<u64, HandlerError> {
        if request.is_chunked() {
            return Err(HandlerError::PayloadTooLarge);
        }

        match request.content_length()? {
            None | Some(0) => Err(HandlerError::LengthRequired),
            Some(length) if length > self.config.max_content_length => Err(HandlerError::PayloadTooLarge),
            Some(length) => Ok(length),
        }
    }
}
