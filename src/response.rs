use std::io::{self, Write};

use crate::error::HandlerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub message: String,
}

impl Response {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(200, message)
    }

    pub fn created(message: impl Into<String>) -> Self {
        Self::new(201, message)
    }

    pub fn reason(&self) -> &'static str {
        reason_phrase(self.status)
    }

    /// Frame the response for the web server: CGI `Status` header, content
    /// headers, blank line, then the message bytes.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let body = self.message.as_bytes();
        write!(out, "Status: {} {}\r\n", self.status, self.reason())?;
        write!(out, "Content-Type: text/plain; charset=utf-8\r\n")?;
        write!(out, "Content-Length: {}\r\n", body.len())?;
        write!(out, "\r\n")?;
        out.write_all(body)?;
        out.flush()
    }
}

impl From<HandlerError> for Response {
    fn from(err: HandlerError) -> Self {
        Response::new(err.status(), err.to_string())
    }
}

pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        411 => "Length Required",
        413 => "Payload Too Large",
        415 => "Unsupported Media Type",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
