//! Viewer state and pipeline recomputation.
//!
//! [`Viewer`] owns the decoded image, the adjustable display
//! parameters and the current [`DisplayBuffer`]. Every parameter
//! setter runs the full kernel → remap → assemble pipeline before
//! returning and then notifies the registered observer, so a render
//! can never mix old and new parameters.

use pfm_io::PortableMap;
use tracing::debug;

use crate::assemble::{assemble, DisplayBuffer};
use crate::remap::remap_channels;
use crate::tone;

/// Smallest exposure a setter will accept; keeps the multiplier positive.
pub const MIN_EXPOSURE: f32 = 1.0e-6;

/// Adjustable display parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    /// Linear exposure multiplier, strictly positive.
    pub exposure: f32,
    /// Display gamma encoding on/off.
    pub gamma: bool,
    /// Filmic tone curve on/off.
    pub tone: bool,
    /// Flip the image vertically.
    pub flip_y: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            gamma: true,
            tone: true,
            flip_y: false,
        }
    }
}

/// Runs the full display pipeline for one image and parameter set.
///
/// Deterministic: the same image and state always produce a
/// bit-identical buffer.
pub fn render(image: &PortableMap, state: &ViewerState) -> DisplayBuffer {
    let kernel = tone::for_header(&image.header, state.gamma, state.tone);
    let signed = kernel.convert(image.payload.bytes(), state.exposure);
    let unsigned = remap_channels(&signed);
    assemble(
        &unsigned,
        image.header.width.max(0) as u32,
        image.header.height.max(0) as u32,
        image.header.channel_count(),
        state.flip_y,
    )
}

type UpdateFn = Box<dyn FnMut(&DisplayBuffer)>;

/// Interactive viewer: decoded image plus derived display buffer.
///
/// The image is immutable after construction; only the display
/// parameters change, and each change swaps in a freshly computed
/// buffer.
pub struct Viewer {
    image: PortableMap,
    state: ViewerState,
    display: DisplayBuffer,
    on_update: Option<UpdateFn>,
}

impl Viewer {
    /// Creates a viewer with default parameters and computes the
    /// initial display buffer.
    pub fn new(image: PortableMap) -> Self {
        Self::with_state(image, ViewerState::default())
    }

    /// Creates a viewer with explicit initial parameters.
    pub fn with_state(image: PortableMap, mut state: ViewerState) -> Self {
        state.exposure = state.exposure.max(MIN_EXPOSURE);
        let display = render(&image, &state);
        Self {
            image,
            state,
            display,
            on_update: None,
        }
    }

    /// Current display parameters.
    pub fn state(&self) -> ViewerState {
        self.state
    }

    /// The buffer the renderer should blit.
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Registers the observer invoked after every recomputation.
    ///
    /// This is the renderer's hook: it always sees a fully rebuilt
    /// buffer, never a partial update.
    pub fn on_update(&mut self, callback: impl FnMut(&DisplayBuffer) + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    /// Sets the exposure multiplier, clamped to stay positive.
    pub fn set_exposure(&mut self, exposure: f32) {
        self.state.exposure = exposure.max(MIN_EXPOSURE);
        self.refresh();
    }

    /// Toggles display gamma encoding.
    pub fn set_gamma(&mut self, enabled: bool) {
        self.state.gamma = enabled;
        self.refresh();
    }

    /// Toggles the filmic tone curve.
    pub fn set_tone(&mut self, enabled: bool) {
        self.state.tone = enabled;
        self.refresh();
    }

    /// Toggles vertical flip.
    pub fn set_flip_y(&mut self, enabled: bool) {
        self.state.flip_y = enabled;
        self.refresh();
    }

    fn refresh(&mut self) {
        debug!(
            exposure = self.state.exposure,
            gamma = self.state.gamma,
            tone = self.state.tone,
            flip_y = self.state.flip_y,
            "recomputing display buffer"
        );
        self.display = render(&self.image, &self.state);
        if let Some(callback) = self.on_update.as_mut() {
            callback(&self.display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn mono_map(samples: &[f32], width: i64, height: i64) -> PortableMap {
        let mut bytes = format!("Pf {width} {height} -1.0\n").into_bytes();
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        PortableMap::read_from(&mut Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn render_is_idempotent() {
        let map = mono_map(&[0.0, 0.25, 0.5, 1.0], 2, 2);
        let state = ViewerState::default();
        assert_eq!(render(&map, &state), render(&map, &state));
    }

    #[test]
    fn mutation_triggers_recompute_and_observer() {
        let map = mono_map(&[0.1, 0.9], 2, 1);
        let mut viewer = Viewer::new(map);

        let fired = Rc::new(Cell::new(0u32));
        let seen = fired.clone();
        viewer.on_update(move |_| seen.set(seen.get() + 1));

        let before = viewer.display().clone();
        viewer.set_exposure(8.0);
        assert_eq!(fired.get(), 1);
        assert_ne!(viewer.display(), &before);

        viewer.set_flip_y(true);
        viewer.set_gamma(false);
        viewer.set_tone(false);
        assert_eq!(fired.get(), 4);
    }

    #[test]
    fn flip_round_trip_through_viewer() {
        let map = mono_map(&[0.0, 0.3, 0.6, 0.9], 2, 2);
        let mut viewer = Viewer::new(map);

        viewer.set_flip_y(true);
        let flipped = viewer.display().clone();
        viewer.set_flip_y(false);
        let straight = viewer.display().clone();

        for y in 0..2 {
            assert_eq!(flipped.row(y), straight.row(2 - 1 - y));
        }
    }

    #[test]
    fn exposure_clamped_positive() {
        let map = mono_map(&[0.5, 0.5], 2, 1);
        let mut viewer = Viewer::new(map);
        viewer.set_exposure(-3.0);
        assert_eq!(viewer.state().exposure, MIN_EXPOSURE);
    }

    #[test]
    fn mono_display_replicates_channels() {
        let map = mono_map(&[0.0, 10.0], 2, 1);
        let viewer = Viewer::new(map);
        let display = viewer.display();

        assert_eq!(display.width(), 2);
        assert_eq!(display.height(), 1);
        let px = display.pixels();
        assert_eq!(px.len(), 6);
        // R=G=B for both pixels.
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], px[4]);
        assert_eq!(px[4], px[5]);
        // A bright sample displays brighter than a black one.
        assert!(px[3] > px[0]);
    }
}
