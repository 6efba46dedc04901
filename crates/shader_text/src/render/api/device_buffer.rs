//! Device buffer abstraction
//!
//! The GPU-visible buffer the glyph indices are uploaded to. Backends wrap
//! their structured/storage buffer in this trait; the text core only ever
//! creates, fully overwrites and releases it.

use crate::render::text::alphabet::{GlyphIndex, BLANK};

/// Result type for device buffer operations
pub type DeviceResult<T> = Result<T, DeviceBufferError>;

/// Errors reported by a device buffer
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeviceBufferError {
    /// Upload length did not match the buffer's element count
    #[error("Upload of {actual} elements does not match buffer capacity {expected}")]
    SizeMismatch {
        /// Element count the buffer was created with
        expected: usize,
        /// Element count of the rejected upload
        actual: usize,
    },

    /// The buffer was used after `release`
    #[error("Device buffer used after release")]
    Released,

    /// Backend failed to allocate the buffer
    #[error("Failed to allocate device buffer: {0}")]
    Allocation(String),
}

/// GPU-visible buffer of glyph indices
///
/// Uploads are always full-length: `write` receives exactly `capacity`
/// elements.
pub trait DeviceBuffer {
    /// Allocate a buffer holding `capacity` elements of `element_size` bytes
    fn create(capacity: usize, element_size: usize) -> DeviceResult<Self>
    where
        Self: Sized;

    /// Overwrite the whole buffer
    fn write(&mut self, elements: &[GlyphIndex]) -> DeviceResult<()>;

    /// Free the backing allocation; further writes fail with `Released`
    fn release(&mut self);

    /// Number of elements the buffer was created with
    fn capacity(&self) -> usize;
}

/// CPU-side device buffer
///
/// Keeps the uploaded bytes in memory. Used headless (tests, the demo app)
/// and as a staging copy by backends that map memory themselves.
#[derive(Debug, Clone)]
pub struct HostBuffer {
    data: Vec<u8>,
    capacity: usize,
    element_size: usize,
    write_count: usize,
    released: bool,
}

impl HostBuffer {
    /// Raw bytes of the last upload
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Glyph indices of the last upload
    pub fn elements(&self) -> &[GlyphIndex] {
        bytemuck::cast_slice(&self.data)
    }

    /// Number of successful `write` calls
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Size of one element in bytes
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Whether `release` has been called
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl DeviceBuffer for HostBuffer {
    fn create(capacity: usize, element_size: usize) -> DeviceResult<Self> {
        if element_size != std::mem::size_of::<GlyphIndex>() {
            return Err(DeviceBufferError::Allocation(format!(
                "unsupported element size {element_size}"
            )));
        }

        Ok(Self {
            data: vec![BLANK; capacity],
            capacity,
            element_size,
            write_count: 0,
            released: false,
        })
    }

    fn write(&mut self, elements: &[GlyphIndex]) -> DeviceResult<()> {
        if self.released {
            return Err(DeviceBufferError::Released);
        }
        if elements.len() != self.capacity {
            return Err(DeviceBufferError::SizeMismatch {
                expected: self.capacity,
                actual: elements.len(),
            });
        }

        self.data.copy_from_slice(bytemuck::cast_slice(elements));
        self.write_count += 1;
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            log::trace!("Releasing host buffer of {} elements", self.capacity);
        }
        self.data = Vec::new();
        self.released = true;
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
