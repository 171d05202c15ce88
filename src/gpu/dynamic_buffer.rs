//! Growable typed GPU buffer.
//!
//! Allocated once and overwritten in place; reallocates only when the data
//! outgrows it, with 2x growth so a resized point set settles quickly.

use std::marker::PhantomData;

/// Minimum allocation in bytes.
const MIN_CAPACITY: usize = 64;

/// A GPU buffer of `T` items that grows on demand.
///
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer with room for `capacity` items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = (size_of::<T>() * capacity).max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, capacity, usage),
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Write `data` from offset zero, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups that
    /// reference it need recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len();

        let reallocated = needed > self.capacity;
        if reallocated {
            let new_capacity = (needed * 2).max(self.capacity + 1024);
            log::debug!(
                "{}: growing {} -> {} bytes",
                self.label,
                self.capacity,
                new_capacity
            );
            self.buffer =
                allocate(device, &self.label, new_capacity, self.usage);
            self.capacity = new_capacity;
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last `write`.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last `write` was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Capacity in items.
    pub fn capacity(&self) -> usize {
        self.capacity / size_of::<T>().max(1)
    }

    /// Byte range holding the last write, for `slice`.
    pub fn used_bytes(&self) -> u64 {
        (self.count * size_of::<T>()) as u64
    }
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: capacity as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
