// File handles accepted by `UtApi::upload_files`: anything that can report
// a name, size and content type and hand out a reader.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// A file that can be summarized for the presign request and opened for
/// the transfer. `open` is called once per upload, after the presign call.
pub trait FileSource {
    fn file_name(&self) -> &str;
    fn size(&self) -> u64;
    fn content_type(&self) -> &str;
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;
}

impl<T: FileSource + ?Sized> FileSource for Box<T> {
    fn file_name(&self) -> &str {
        (**self).file_name()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn content_type(&self) -> &str {
        (**self).content_type()
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
        (**self).open()
    }
}

/// A file on the local disk.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    file_name: String,
    size: u64,
    content_type: String,
}

impl LocalFile {
    /// Stat the file at `path`. The content type is guessed from the
    /// extension and falls back to `application/octet-stream`.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = std::fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            path,
            file_name,
            size: metadata.len(),
            content_type,
        })
    }

    /// Override the guessed content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

}

impl FileSource for LocalFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}

/// An in-memory file, handy for generated content.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

impl MemoryFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

impl FileSource for MemoryFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.data.clone())))
    }
}
