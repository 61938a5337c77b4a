//! Scroll regions. A region owns a content child and two scrollbars. Measure
//! negotiates which bars are needed: reserving a bar shrinks the viewport,
//! which can make the other axis overflow. Bars only ever switch on during a
//! negotiation, so it settles within three rounds.

use crate::{
    NodeId,
    error::{Error, Result},
    geom::{Axis, Expanse, Point, Rect, UNBOUNDED},
    layout::Layout,
    measure::offset,
    node::Kind,
    tree::Core,
};

/// Per-axis scroll state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAxis {
    /// Scrolling is allowed on this axis.
    pub enabled: bool,
    /// Scroll position, 0 at the start and 1 at the end.
    pub fraction: f32,
    /// The bar was shown by the last negotiation.
    pub shown: bool,
}

impl Default for ScrollAxis {
    fn default() -> Self {
        Self {
            enabled: true,
            fraction: 0.0,
            shown: false,
        }
    }
}

/// Scroll region state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRegion {
    /// The content child.
    pub(crate) content: NodeId,
    /// Horizontal scrollbar node.
    pub(crate) h_bar: NodeId,
    /// Vertical scrollbar node.
    pub(crate) v_bar: NodeId,
    /// Horizontal axis state.
    pub(crate) h: ScrollAxis,
    /// Vertical axis state.
    pub(crate) v: ScrollAxis,
    /// Hide bars that are not needed. Without auto-hide, bars on enabled
    /// axes are always reserved.
    pub(crate) auto_hide: bool,
    /// Content size from the last measure.
    pub(crate) content_size: Expanse,
    /// Viewport size from the last arrange.
    pub(crate) viewport: Expanse,
    /// Rounds taken by the last negotiation.
    pub(crate) iterations: u32,
}

impl ScrollRegion {
    /// Axis state.
    pub fn axis(&self, axis: Axis) -> &ScrollAxis {
        match axis {
            Axis::Horizontal => &self.h,
            Axis::Vertical => &self.v,
        }
    }

    /// Mutable axis state.
    fn axis_mut(&mut self, axis: Axis) -> &mut ScrollAxis {
        match axis {
            Axis::Horizontal => &mut self.h,
            Axis::Vertical => &mut self.v,
        }
    }

    /// The content child.
    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Scrollable distance along an axis.
    fn range(&self, axis: Axis) -> u32 {
        let size = self.content_size.max(self.viewport);
        size.along(axis).saturating_sub(self.viewport.along(axis))
    }
}

/// A scrollbar belonging to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrollbar {
    /// The region it scrolls.
    pub(crate) region: NodeId,
    /// The axis it scrolls along.
    pub(crate) axis: Axis,
}

impl Core {
    /// Append a scroll region to `parent`. Returns the region; use
    /// [`Core::scroll_content`] to reach the node that holds scrolled content.
    pub fn add_scroll_region(&mut self, parent: NodeId, layout: Layout) -> Result<NodeId> {
        self.get(parent)?;
        let content = self.create_detached(Kind::Container, Layout::new().min(0, 0));
        let h_bar = self.create_detached(Kind::Container, Layout::default());
        let v_bar = self.create_detached(Kind::Container, Layout::default());
        let region = self.create_detached(
            Kind::ScrollRegion(ScrollRegion {
                content,
                h_bar,
                v_bar,
                h: ScrollAxis::default(),
                v: ScrollAxis::default(),
                auto_hide: true,
                content_size: Expanse::default(),
                viewport: Expanse::default(),
                iterations: 0,
            }),
            layout,
        );
        for (bar, axis) in [(h_bar, Axis::Horizontal), (v_bar, Axis::Vertical)] {
            let node = self.get_mut(bar)?;
            node.kind = Kind::Scrollbar(Scrollbar { region, axis });
            node.flags.pointer_input = true;
            node.flags.collapsed = true;
        }
        {
            let node = self.get_mut(region)?;
            node.flags.virtual_control = true;
            node.flags.pointer_input = true;
        }
        self.attach(region, content)?;
        self.attach(region, h_bar)?;
        self.attach(region, v_bar)?;
        self.attach(parent, region)?;
        Ok(region)
    }

    /// Scroll region state.
    pub fn scroll_region(&self, region: NodeId) -> Result<&ScrollRegion> {
        match &self.get(region)?.kind {
            Kind::ScrollRegion(s) => Ok(s),
            _ => Err(Error::WrongKind {
                node: region,
                expected: "scroll region",
            }),
        }
    }

    /// Mutable scroll region state.
    fn scroll_region_mut(&mut self, region: NodeId) -> Result<&mut ScrollRegion> {
        match &mut self.get_mut(region)?.kind {
            Kind::ScrollRegion(s) => Ok(s),
            _ => Err(Error::WrongKind {
                node: region,
                expected: "scroll region",
            }),
        }
    }

    /// The node that holds a region's scrolled content.
    pub fn scroll_content(&self, region: NodeId) -> Result<NodeId> {
        Ok(self.scroll_region(region)?.content)
    }

    /// A region's scrollbar node for an axis.
    pub fn scrollbar(&self, region: NodeId, axis: Axis) -> Result<NodeId> {
        let s = self.scroll_region(region)?;
        Ok(match axis {
            Axis::Horizontal => s.h_bar,
            Axis::Vertical => s.v_bar,
        })
    }

    /// Allow or forbid scrolling on an axis.
    pub fn set_scroll_enabled(&mut self, region: NodeId, axis: Axis, enabled: bool) -> Result<()> {
        self.scroll_region_mut(region)?.axis_mut(axis).enabled = enabled;
        self.invalidate(region);
        Ok(())
    }

    /// Hide bars that are not needed, or always reserve bars on enabled axes.
    pub fn set_auto_hide(&mut self, region: NodeId, auto_hide: bool) -> Result<()> {
        self.scroll_region_mut(region)?.auto_hide = auto_hide;
        self.invalidate(region);
        Ok(())
    }

    /// Was the bar on this axis shown by the last negotiation?
    pub fn scrollbar_visible(&self, region: NodeId, axis: Axis) -> Result<bool> {
        Ok(self.scroll_region(region)?.axis(axis).shown)
    }

    /// Scroll position along an axis, from 0 to 1.
    pub fn scroll_fraction(&self, region: NodeId, axis: Axis) -> Result<f32> {
        Ok(self.scroll_region(region)?.axis(axis).fraction)
    }

    /// Set the scroll position along an axis. Values are clamped to 0..=1.
    /// The content moves when the region is next laid out.
    pub fn set_scroll_fraction(&mut self, region: NodeId, axis: Axis, fraction: f32) -> Result<()> {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let a = self.scroll_region_mut(region)?.axis_mut(axis);
        if a.fraction != fraction {
            a.fraction = fraction;
            self.invalidate(region);
        }
        Ok(())
    }

    /// Scroll by a number of pixels along an axis. Returns `false` if the
    /// position did not move, either because there is nothing to scroll or
    /// because it is already at the limit.
    pub fn scroll_by(&mut self, region: NodeId, axis: Axis, pixels: i32) -> Result<bool> {
        let s = self.scroll_region(region)?;
        let range = s.range(axis);
        if range == 0 || !s.axis(axis).enabled || pixels == 0 {
            return Ok(false);
        }
        let before = s.axis(axis).fraction;
        self.set_scroll_fraction(region, axis, before + pixels as f32 / range as f32)?;
        Ok(self.scroll_fraction(region, axis)? != before)
    }

    /// Scroll so that `node`, a descendant of the region's content, is within
    /// the viewport. Uses the current arrangement.
    pub fn scroll_to(&mut self, region: NodeId, node: NodeId) -> Result<()> {
        let content = self.scroll_content(region)?;
        if !self.is_ancestor(content, node) {
            return Err(Error::Invalid(format!(
                "{node:?} is not inside scroll region {region:?}"
            )));
        }
        let origin = self.absolute_bounds(content)?.tl;
        let target = self.absolute_bounds(node)?;
        let within = target.shift(-origin.x, -origin.y);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let s = self.scroll_region(region)?;
            let range = s.range(axis);
            if range == 0 {
                continue;
            }
            let view = s.viewport.along(axis) as i64;
            let current = (s.axis(axis).fraction as f64 * range as f64).round() as i64;
            let start = within.start(axis) as i64;
            let end = start + within.extent(axis) as i64;
            let wanted = if start < current {
                start
            } else if end > current + view {
                end - view
            } else {
                continue;
            };
            let wanted = wanted.clamp(0, range as i64);
            self.set_scroll_fraction(region, axis, (wanted as f64 / range as f64) as f32)?;
        }
        Ok(())
    }

    /// The content offset applied by the last arrange. Zero or negative.
    pub fn scroll_offset(&self, region: NodeId) -> Result<Point> {
        let content = self.scroll_content(region)?;
        Ok(self.bounds(content)?.tl)
    }

    /// Rounds taken by the last scrollbar negotiation.
    pub fn scroll_iterations(&self, region: NodeId) -> Result<u32> {
        Ok(self.scroll_region(region)?.iterations)
    }

    /// The thumb rect of a scrollbar, in the bar's local coordinates.
    pub fn scrollbar_thumb(&self, bar: NodeId) -> Result<Rect> {
        let Kind::Scrollbar(sb) = self.get(bar)?.kind else {
            return Err(Error::WrongKind {
                node: bar,
                expected: "scrollbar",
            });
        };
        let local = self.get(bar)?.render_bounds();
        let s = self.scroll_region(sb.region)?;
        let (thumb, pos) = thumb_geometry(
            s,
            sb.axis,
            local.extent(sb.axis),
            self.config.scrollbar_thickness,
        );
        Ok(match sb.axis {
            Axis::Horizontal => Rect::new(offset(pos), 0, thumb, local.h),
            Axis::Vertical => Rect::new(0, offset(pos), local.w, thumb),
        })
    }

    /// Drag a scrollbar's thumb by `delta` pixels along its axis.
    pub(crate) fn drag_scrollbar(&mut self, bar: NodeId, delta: Point) -> Result<bool> {
        let Kind::Scrollbar(sb) = self.get(bar)?.kind else {
            return Ok(false);
        };
        let track = self.get(bar)?.bounds.extent(sb.axis);
        let s = self.scroll_region(sb.region)?;
        let (thumb, _) = thumb_geometry(s, sb.axis, track, self.config.scrollbar_thickness);
        let travel = track.saturating_sub(thumb);
        let d = delta.along(sb.axis);
        if travel == 0 || d == 0 {
            return Ok(false);
        }
        let fraction = s.axis(sb.axis).fraction + d as f32 / travel as f32;
        self.set_scroll_fraction(sb.region, sb.axis, fraction)?;
        Ok(true)
    }

    /// Negotiate scrollbars and measure the region.
    pub(crate) fn measure_scroll(&mut self, id: NodeId, avail: Expanse) -> Result<Expanse> {
        let s = self.scroll_region(id)?.clone();
        let t = self.config.scrollbar_thickness;
        let max_rounds = self.config.scroll_iterations.max(1);
        let mut need_h = s.h.enabled && !s.auto_hide;
        let mut need_v = s.v.enabled && !s.auto_hide;
        let mut content;
        let mut rounds = 0;
        loop {
            rounds += 1;
            let viewport = viewport_for(avail, need_h, need_v, t);
            let content_avail = Expanse::new(
                if s.h.enabled { UNBOUNDED } else { viewport.w },
                if s.v.enabled { UNBOUNDED } else { viewport.h },
            );
            content = self.measure_node(s.content, content_avail)?;
            let over_h = need_h || (s.h.enabled && content.w > viewport.w);
            let over_v = need_v || (s.v.enabled && content.h > viewport.h);
            let settled = over_h == need_h && over_v == need_v;
            need_h = over_h;
            need_v = over_v;
            if settled || rounds >= max_rounds {
                break;
            }
        }
        let viewport = viewport_for(avail, need_h, need_v, t);

        self.get_mut(s.h_bar)?.flags.collapsed = !need_h;
        self.get_mut(s.v_bar)?.flags.collapsed = !need_v;
        self.measure_node(s.h_bar, Expanse::new(viewport.w, t))?;
        self.measure_node(s.v_bar, Expanse::new(t, viewport.h))?;

        let st = self.scroll_region_mut(id)?;
        st.h.shown = need_h;
        st.v.shown = need_v;
        st.content_size = content;
        st.iterations = rounds;
        if rounds > 1 {
            tracing::trace!(?id, rounds, need_h, need_v, "scrollbar negotiation");
        }

        let bars = Expanse::new(if need_v { t } else { 0 }, if need_h { t } else { 0 });
        let want = Expanse::new(
            content.w.saturating_add(bars.w),
            content.h.saturating_add(bars.h),
        );
        Ok(want.min(avail))
    }

    /// Place the content at its scroll offset and the bars on the edges.
    pub(crate) fn arrange_scroll(&mut self, id: NodeId, area: Rect) -> Result<()> {
        let s = self.scroll_region(id)?.clone();
        let t = self.config.scrollbar_thickness;
        let viewport = viewport_for(area.expanse(), s.h.shown, s.v.shown, t);
        let measured = self.get(s.content)?.measured;
        let size = Expanse::new(
            if s.h.enabled { measured.w.max(viewport.w) } else { viewport.w },
            if s.v.enabled { measured.h.max(viewport.h) } else { viewport.h },
        );
        let range = size.saturating_sub(viewport);
        let off_x = scroll_offset(s.h, range.w);
        let off_y = scroll_offset(s.v, range.h);
        self.arrange_node(
            s.content,
            Rect::new(
                area.left().saturating_sub(offset(off_x)),
                area.top().saturating_sub(offset(off_y)),
                size.w,
                size.h,
            ),
        )?;
        if s.v.shown {
            let x = area.right().saturating_sub(offset(t.min(area.w)));
            self.arrange_node(s.v_bar, Rect::new(x, area.top(), t.min(area.w), viewport.h))?;
        }
        if s.h.shown {
            let y = area.bottom().saturating_sub(offset(t.min(area.h)));
            self.arrange_node(s.h_bar, Rect::new(area.left(), y, viewport.w, t.min(area.h)))?;
        }
        let st = self.scroll_region_mut(id)?;
        st.viewport = viewport;
        st.content_size = measured;
        Ok(())
    }
}

/// The viewport left after reserving bars.
fn viewport_for(avail: Expanse, need_h: bool, need_v: bool, t: u32) -> Expanse {
    avail.saturating_sub(Expanse::new(
        if need_v { t } else { 0 },
        if need_h { t } else { 0 },
    ))
}

/// Pixel offset of the content along an axis.
fn scroll_offset(axis: ScrollAxis, range: u32) -> u32 {
    if !axis.enabled {
        return 0;
    }
    ((axis.fraction.clamp(0.0, 1.0) as f64 * range as f64).round() as u32).min(range)
}

/// Thumb length and position for a bar with the given track length.
fn thumb_geometry(s: &ScrollRegion, axis: Axis, track: u32, min_thumb: u32) -> (u32, u32) {
    let view = s.viewport.along(axis);
    let content = s.content_size.max(s.viewport).along(axis);
    let thumb = if content == 0 {
        track
    } else {
        ((track as f64 * view as f64 / content as f64).round() as u32)
            .max(min_thumb.min(track))
            .min(track)
    };
    let travel = track - thumb;
    let pos = (s.axis(axis).fraction.clamp(0.0, 1.0) as f64 * travel as f64).round() as u32;
    (thumb, pos.min(travel))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_with_content(w: u32, h: u32) -> Result<(Core, NodeId, NodeId)> {
        let mut core = Core::default();
        let root = core.root();
        let region = core.add_scroll_region(root, Layout::new().size(113, 100))?;
        let content = core.scroll_content(region)?;
        let leaf = core.add_container(content, Layout::new().size(w, h))?;
        Ok((core, region, leaf))
    }

    #[test]
    fn content_that_fits_needs_no_bars() -> Result<()> {
        let (mut core, region, _) = region_with_content(50, 50)?;
        core.layout(Expanse::new(300, 300))?;
        assert!(!core.scrollbar_visible(region, Axis::Horizontal)?);
        assert!(!core.scrollbar_visible(region, Axis::Vertical)?);
        assert_eq!(core.scroll_iterations(region)?, 1);
        Ok(())
    }

    #[test]
    fn one_bar_forces_the_other() -> Result<()> {
        // 110 wide fits in 113, but not in the 100 left by the vertical bar.
        let (mut core, region, _) = region_with_content(110, 250)?;
        core.layout(Expanse::new(300, 300))?;
        assert!(core.scrollbar_visible(region, Axis::Horizontal)?);
        assert!(core.scrollbar_visible(region, Axis::Vertical)?);
        assert!(core.scroll_iterations(region)? <= 3);
        Ok(())
    }

    #[test]
    fn disabled_axis_constrains_content() -> Result<()> {
        let (mut core, region, _) = region_with_content(500, 50)?;
        core.set_scroll_enabled(region, Axis::Horizontal, false)?;
        core.layout(Expanse::new(300, 300))?;
        assert!(!core.scrollbar_visible(region, Axis::Horizontal)?);
        let content = core.scroll_content(region)?;
        assert_eq!(core.bounds(content)?.w, 113);
        Ok(())
    }

    #[test]
    fn fixed_bars_without_auto_hide() -> Result<()> {
        let (mut core, region, _) = region_with_content(10, 10)?;
        core.set_auto_hide(region, false)?;
        core.layout(Expanse::new(300, 300))?;
        assert!(core.scrollbar_visible(region, Axis::Horizontal)?);
        assert!(core.scrollbar_visible(region, Axis::Vertical)?);
        Ok(())
    }

    #[test]
    fn thumb_tracks_fraction() -> Result<()> {
        let (mut core, region, _) = region_with_content(100, 400)?;
        core.layout(Expanse::new(300, 300))?;
        let bar = core.scrollbar(region, Axis::Vertical)?;
        // Viewport 100 of 400 on a 100 track: a 25 pixel thumb.
        assert_eq!(core.scrollbar_thumb(bar)?, Rect::new(0, 0, 13, 25));
        core.set_scroll_fraction(region, Axis::Vertical, 1.0)?;
        assert_eq!(core.scrollbar_thumb(bar)?, Rect::new(0, 75, 13, 25));
        Ok(())
    }

    #[test]
    fn scroll_by_clamps() -> Result<()> {
        let (mut core, region, _) = region_with_content(100, 250)?;
        core.layout(Expanse::new(300, 300))?;
        assert!(core.scroll_by(region, Axis::Vertical, 75)?);
        assert_eq!(core.scroll_fraction(region, Axis::Vertical)?, 0.5);
        core.scroll_by(region, Axis::Vertical, 1000)?;
        assert_eq!(core.scroll_fraction(region, Axis::Vertical)?, 1.0);
        assert!(!core.scroll_by(region, Axis::Horizontal, 10)?);
        Ok(())
    }
}
