//! Apply parsed [`Settings`] to sheet parameters, cell metrics and the
//! capture frame.

use crate::cells::CellMetrics;
use crate::geometry::Color;
use crate::sheet::SheetParams;

use super::values::Settings;

#[cfg(feature = "std")]
use crate::capture::{CaptureError, CaptureRegion, HotkeyRegistry};

impl Settings {
    /// Overlay the sheet settings on `base`.
    ///
    /// The result is [`clamped`](SheetParams::clamped), so it can be passed
    /// straight to placement.
    pub fn sheet_params(&self, base: SheetParams) -> SheetParams {
        let mut p = base;
        if let Some(v) = self.contrast {
            p.contrast = v;
        }
        if let Some(v) = self.brightness {
            p.brightness = v;
        }
        if let Some(v) = self.columns {
            p.columns = v;
        }
        if let Some(v) = self.repeats {
            p.repeats = v;
        }
        if let Some(v) = self.order {
            p.order = v;
        }
        p.clamped()
    }

    /// Cell metrics for the `viewport` setting, if one was given.
    ///
    /// Cells are sized for `columns` (default 5) whatever the reading order.
    pub fn cell_metrics(&self) -> Option<CellMetrics> {
        let columns = self
            .columns
            .unwrap_or(SheetParams::new().columns)
            .clamp(1, SheetParams::MAX_COLUMNS);
        self.viewport
            .map(|viewport| CellMetrics::for_viewport(viewport, columns))
    }

    /// Sheet background, white unless `bgcolor` was given.
    pub fn background(&self) -> Color {
        self.bgcolor.unwrap_or(Color::WHITE)
    }

    /// Apply the capture-frame settings to `region`.
    ///
    /// A lone `x` or `y` (or `width` or `height`) keeps the region's other
    /// coordinate. The hotkey is not touched, see [`Self::apply_hotkey`].
    #[cfg(feature = "std")]
    pub fn apply_to_region(&self, region: &mut CaptureRegion) -> Result<(), CaptureError> {
        if let Some(prefix) = &self.prefix {
            region.set_prefix(prefix)?;
        }
        if self.x.is_some() || self.y.is_some() {
            region.set_position(self.x.unwrap_or(region.x()), self.y.unwrap_or(region.y()));
        }
        if self.width.is_some() || self.height.is_some() {
            let size = region.size();
            region.set_size(
                self.width.unwrap_or(size.width),
                self.height.unwrap_or(size.height),
            );
        }
        if let Some(border) = self.border {
            region.set_border_width(border);
        }
        if let Some(opacity) = self.opacity {
            region.set_opacity_percent(opacity);
        }
        if let Some(grid) = self.grid {
            region.set_grid(grid);
        }
        Ok(())
    }

    /// Rebind the region's hotkey if `hotkey` was given.
    ///
    /// Returns `Ok(true)` when the registration moved.
    #[cfg(feature = "std")]
    pub fn apply_hotkey<R: HotkeyRegistry + ?Sized>(
        &self,
        region: &mut CaptureRegion,
        registry: &mut R,
    ) -> Result<bool, R::Error> {
        match &self.hotkey {
            Some(hotkey) => region.rebind_hotkey(hotkey, registry),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Size;
    use crate::guide::GridType;
    use crate::settings::parse;
    use crate::sheet::{ReadingOrder, SheetParams};

    #[test]
    fn sheet_params_overlay_base() {
        let s = parse("repeats=3&order=column").settings;
        let base = SheetParams::new().columns(7).contrast(1.3);
        let p = s.sheet_params(base);
        assert_eq!(p.columns, 7);
        assert_eq!(p.repeats, 3);
        assert_eq!(p.order, ReadingOrder::ColumnMajorRtl);
        assert!((p.contrast - 1.3).abs() < 1e-6);
    }

    #[test]
    fn sheet_params_clamps_base() {
        let s = parse("").settings;
        let p = s.sheet_params(SheetParams::new().columns(0).brightness(5.0));
        assert_eq!(p.columns, 1);
        assert_eq!(p.brightness, 2.0);
    }

    #[test]
    fn cell_metrics_from_viewport() {
        let s = parse("viewport=545&cols=5").settings;
        assert_eq!(s.cell_metrics().unwrap().cell, Size::new(101, 121));

        let s = parse("viewport=545").settings;
        assert_eq!(s.cell_metrics().unwrap().cell, Size::new(101, 121));

        assert_eq!(parse("cols=5").settings.cell_metrics(), None);
    }

    #[test]
    fn background_default_and_named() {
        assert_eq!(parse("").settings.background(), crate::Color::WHITE);
        assert_eq!(
            parse("bgcolor=000").settings.background(),
            crate::Color::BLACK
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn apply_to_region_partial() {
        use crate::capture::CaptureRegion;

        let mut r = CaptureRegion::new();
        let s = parse("x=10&h=250&border=5&opacity=30&grid=tian&prefix=page").settings;
        s.apply_to_region(&mut r).unwrap();
        assert_eq!((r.x(), r.y()), (10, 100));
        assert_eq!(r.size(), Size::new(400, 250));
        assert_eq!(r.border_width(), 5);
        assert_eq!(r.opacity(), 0.3);
        assert_eq!(r.grid(), GridType::Tian);
        assert_eq!(r.prefix(), "page");
        assert_eq!(r.hotkey(), "f1");
    }

    #[cfg(feature = "std")]
    #[test]
    fn apply_hotkey_rebinds() {
        use crate::capture::{CaptureRegion, HotkeyRegistry};

        #[derive(Default)]
        struct Keys(Vec<String>);

        impl HotkeyRegistry for Keys {
            type Error = ();

            fn register(&mut self, hotkey: &str) -> Result<(), ()> {
                self.0.push(hotkey.to_owned());
                Ok(())
            }

            fn unregister(&mut self, hotkey: &str) {
                self.0.retain(|k| k != hotkey);
            }
        }

        let mut r = CaptureRegion::new();
        let mut keys = Keys::default();
        r.bind_hotkey(&mut keys).unwrap();

        assert_eq!(parse("w=300").settings.apply_hotkey(&mut r, &mut keys), Ok(false));
        assert_eq!(parse("hotkey=F3").settings.apply_hotkey(&mut r, &mut keys), Ok(true));
        assert_eq!(r.hotkey(), "f3");
        assert_eq!(keys.0, vec!["f3"]);
    }
}
