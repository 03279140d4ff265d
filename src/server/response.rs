use std::io::{self, Write};

/// Writes raw HTTP/1.1 responses onto the outbound half of a connection.
///
/// Every method returns the underlying I/O result instead of swallowing it;
/// the connection handler decides whether a failed write is worth more than
/// a log line. The `Content-Length` emitted with a body is always the exact
/// byte length the caller is about to write.
pub struct ResponseWriter<W: Write> {
    out: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `200 OK` headers framing a body of `content_length` bytes.
    pub fn ok(&mut self, content_length: usize, content_type: &str) -> io::Result<()> {
        write!(self.out, "HTTP/1.1 200 OK\r\n")?;
        write!(self.out, "Content-Type: {content_type}\r\n")?;
        write!(self.out, "Content-Length: {content_length}\r\n")?;
        write!(self.out, "\r\n")
    }

    /// `302 Found` pointing the client at `location`.
    pub fn redirect(&mut self, location: &str) -> io::Result<()> {
        write!(self.out, "HTTP/1.1 302 Found\r\n")?;
        write!(self.out, "Location: {location}\r\n")?;
        write!(self.out, "\r\n")?;
        self.out.flush()
    }

    /// Successful login: redirect home with the session cookie set.
    pub fn login_redirect(&mut self) -> io::Result<()> {
        write!(self.out, "HTTP/1.1 302 Found\r\n")?;
        write!(self.out, "Set-Cookie: logined=true\r\n")?;
        write!(self.out, "Location: /index.html\r\n")?;
        write!(self.out, "\r\n")?;
        self.out.flush()
    }

    /// `404 Not Found` headers framing a body of `content_length` bytes.
    pub fn not_found(&mut self, content_length: usize) -> io::Result<()> {
        write!(self.out, "HTTP/1.1 404 Not Found\r\n")?;
        write!(self.out, "Content-Type: text/html;charset=utf-8\r\n")?;
        write!(self.out, "Content-Length: {content_length}\r\n")?;
        write!(self.out, "\r\n")
    }

    /// Bodyless `400 Bad Request`, sent before closing a connection whose
    /// request could not be parsed.
    pub fn bad_request(&mut self) -> io::Result<()> {
        write!(self.out, "HTTP/1.1 400 Bad Request\r\n")?;
        write!(self.out, "Content-Length: 0\r\n")?;
        write!(self.out, "\r\n")?;
        self.out.flush()
    }

    /// Write the body bytes and flush the stream.
    pub fn body(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)?;
        self.out.flush()
    }
}
