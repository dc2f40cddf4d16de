//! Lock-free stereo capture ring for the visualiser.
//!
//! The audio context pushes one stereo frame per sample; the control context
//! copies the whole ring out when it redraws. Samples are stored as `f32`
//! bit patterns in [`AtomicU32`] cells, so no read can ever observe a torn
//! or uninitialised float, and neither side ever waits.
//!
//! # Consistency
//!
//! A snapshot taken while the writer is active may mix frames from just
//! before and just after a push. That is acceptable for shape and XY
//! display; nothing here is used for playback.
//!
//! **Invariant:** exactly one context calls [`WaveformCapture::push`]. Any
//! number may call [`WaveformCapture::snapshot`].

use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Number of stereo frames retained.
pub const CAPTURE_LEN: usize = 128;

/// A copy of the ring, oldest frame first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSnapshot {
    /// Left channel, oldest first.
    pub left: [f32; CAPTURE_LEN],
    /// Right channel, oldest first.
    pub right: [f32; CAPTURE_LEN],
}

impl Default for CaptureSnapshot {
    fn default() -> Self {
        Self {
            left: [0.0; CAPTURE_LEN],
            right: [0.0; CAPTURE_LEN],
        }
    }
}

impl CaptureSnapshot {
    /// Iterate `(left, right)` pairs, oldest first.
    pub fn frames(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.left.iter().copied().zip(self.right.iter().copied())
    }
}

/// Fixed-size single-producer ring of the most recent stereo frames.
///
/// Zero-filled until the first [`CAPTURE_LEN`] pushes; always fully
/// populated afterwards.
///
/// # Example
///
/// ```
/// use subharmonicon::{WaveformCapture, CAPTURE_LEN};
///
/// static CAPTURE: WaveformCapture = WaveformCapture::new();
///
/// CAPTURE.push(0.25, -0.25);
/// let snap = CAPTURE.snapshot();
/// assert_eq!(snap.left[CAPTURE_LEN - 1], 0.25);
/// assert_eq!(snap.right[CAPTURE_LEN - 1], -0.25);
/// ```
pub struct WaveformCapture {
    left: [AtomicU32; CAPTURE_LEN],
    right: [AtomicU32; CAPTURE_LEN],
    /// Next slot to overwrite. Always `< CAPTURE_LEN`.
    cursor: AtomicUsize,
}

impl Default for WaveformCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformCapture {
    /// A zero-filled ring. `const` so it can back a `static`.
    pub const fn new() -> Self {
        Self {
            // 0u32 is the bit pattern of +0.0.
            left: [const { AtomicU32::new(0) }; CAPTURE_LEN],
            right: [const { AtomicU32::new(0) }; CAPTURE_LEN],
            cursor: AtomicUsize::new(0),
        }
    }

    /// Record one stereo frame and advance the cursor.
    ///
    /// Audio-context only. Wait-free: two relaxed stores and a release
    /// store of the cursor.
    #[inline]
    pub fn push(&self, left: f32, right: f32) {
        let slot = self.cursor.load(Ordering::Relaxed);
        self.left[slot].store(left.to_bits(), Ordering::Relaxed);
        self.right[slot].store(right.to_bits(), Ordering::Relaxed);
        self.cursor
            .store((slot + 1) % CAPTURE_LEN, Ordering::Release);
    }

    /// Index of the next slot to be overwritten (the oldest frame).
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Copy the ring out, oldest frame first.
    pub fn snapshot(&self) -> CaptureSnapshot {
        let mut snap = CaptureSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Copy the ring into an existing snapshot, oldest frame first.
    ///
    /// Lets a render loop reuse one buffer instead of returning 1 KiB by
    /// value every frame.
    pub fn snapshot_into(&self, snap: &mut CaptureSnapshot) {
        let start = self.cursor.load(Ordering::Acquire);
        for i in 0..CAPTURE_LEN {
            let slot = (start + i) % CAPTURE_LEN;
            snap.left[i] = f32::from_bits(self.left[slot].load(Ordering::Relaxed));
            snap.right[i] = f32::from_bits(self.right[slot].load(Ordering::Relaxed));
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
