//! Animated toggle-switch widget.
//!
//! A `ToggleSwitch` is built from five owned layers: a background
//! track, a sliding thumb, on/off icon layers that cross-fade as the
//! thumb moves, and an optional thumb icon. The logical `value` only
//! changes at gesture end (or through [`ToggleSwitch::set_value`]);
//! while a finger is down only the rendered `visual_value` follows the
//! touch position.

use serde::{Deserialize, Serialize};
use std::any::Any;
use togglekit_core::{
    animation::{EasedValue, Easing, Interpolate, KeyframeTrack, Transition},
    widget::{AccessibleRole, LayoutResult},
    BoxStyle, Canvas, Color, Constraints, Event, MouseButton, Point, Rect, Shadow, Size,
    StrokeStyle, Transform2D, TypeId, Widget,
};

/// Message emitted when the committed value changes at gesture end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchChanged {
    /// The new committed value
    pub on: bool,
}

/// Corner treatment for track and thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CornerStyle {
    /// Capsule track, circular thumb
    #[default]
    Rounded,
    /// Small fixed corner radius
    Square,
}

const DEFAULT_SIZE: Size = Size::new(50.0, 30.0);
const THUMB_INSET: f32 = 1.0;
const DRAG_EXPANSION: f32 = 5.0;
const BORDER_WIDTH: f32 = 1.0;
const SQUARE_RADIUS: f32 = 2.0;
const TRANSITION_SECS: f64 = 0.3;
const BOUNCE_SECS: f64 = 1.0;
const SPIN_SECS: f64 = 0.5;
const BOUNCE_SCALE: [f32; 7] = [1.0, 1.4, 0.9, 1.15, 0.95, 1.02, 1.0];
const FULL_SPIN: f64 = -2.0 * std::f64::consts::PI;

/// Rendered properties of one layer at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct LayerVisual {
    frame: Rect,
    fill: Color,
    border: Color,
    radius: f32,
    opacity: f32,
}

impl Interpolate for LayerVisual {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            frame: Rect::interpolate(&from.frame, &to.frame, t),
            fill: Color::interpolate(&from.fill, &to.fill, t),
            border: Color::interpolate(&from.border, &to.border, t),
            radius: f32::interpolate(&from.radius, &to.radius, t),
            opacity: f32::interpolate(&from.opacity, &to.opacity, t),
        }
    }
}

/// Icon layer: an animatable layer plus decorative scale/spin effects.
#[derive(Debug, Clone, Default)]
struct IconLayer {
    layer: Transition<LayerVisual>,
    tint: Option<Color>,
    bounce: Option<KeyframeTrack<f32>>,
    spin: Option<EasedValue>,
}

impl IconLayer {
    /// Scale bounce played when this icon fades in on the "on" side.
    fn play_bounce(&mut self) {
        self.bounce = Some(KeyframeTrack::from_values(&BOUNCE_SCALE, BOUNCE_SECS));
        self.spin = None;
        self.tint = Some(Color::WHITE);
    }

    /// Full rotation played when this icon fades in on the "off" side.
    fn play_spin(&mut self) {
        self.spin = Some(EasedValue::new(0.0, FULL_SPIN, SPIN_SECS).with_easing(Easing::Linear));
        self.bounce = None;
        self.tint = Some(Color::GRAY);
    }

    fn clear_effects(&mut self) {
        self.bounce = None;
        self.spin = None;
    }

    fn update(&mut self, dt: f64) {
        self.layer.update(dt);
        if let Some(bounce) = &mut self.bounce {
            bounce.update(dt);
            if bounce.is_complete() {
                self.bounce = None;
            }
        }
        if let Some(spin) = &mut self.spin {
            spin.update(dt);
            if spin.is_complete() {
                self.spin = None;
            }
        }
    }

    /// Effect transform about the icon's painted center.
    fn transform(&self, center: Point) -> Transform2D {
        let mut transform = Transform2D::IDENTITY;
        if let Some(scale) = self.bounce.as_ref().and_then(KeyframeTrack::value) {
            transform = transform.then(&Transform2D::scale_about(center, scale));
        }
        if let Some(spin) = &self.spin {
            transform = transform.then(&Transform2D::rotate_about(center, spin.value() as f32));
        }
        transform
    }
}

/// Animated on/off switch with draggable thumb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleSwitch {
    /// Committed value; source of truth
    value: bool,
    /// Track color while dragging on the off side
    active_track_color: Color,
    /// Track color at rest while off
    inactive_track_color: Color,
    /// Track color while on
    on_track_color: Color,
    /// Track border color while off
    border_color: Color,
    /// Thumb color while off
    thumb_color: Color,
    /// Thumb color while on
    on_thumb_color: Color,
    /// Whether `on_thumb_color` was set explicitly
    on_thumb_color_set: bool,
    /// Thumb drop-shadow color
    thumb_shadow_color: Color,
    /// Corner treatment
    corner_style: CornerStyle,
    /// Icon shown on the on side
    on_image: Option<String>,
    /// Icon shown on the off side
    off_image: Option<String>,
    /// Icon centered in the thumb
    thumb_image: Option<String>,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    #[serde(skip)]
    bounds: Rect,
    /// Last value actually rendered; may lag `value` during a drag
    #[serde(skip)]
    visual_value: bool,
    #[serde(skip)]
    dragging: bool,
    #[serde(skip)]
    drag_start_value: bool,
    #[serde(skip)]
    changed_during_drag: bool,
    /// Suppresses layout recomputation while a transition is in flight
    #[serde(skip)]
    animating: bool,
    #[serde(skip)]
    track: Transition<LayerVisual>,
    #[serde(skip)]
    thumb: Transition<LayerVisual>,
    #[serde(skip)]
    on_icon: IconLayer,
    #[serde(skip)]
    off_icon: IconLayer,
}

impl Default for ToggleSwitch {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl ToggleSwitch {
    /// Create a switch with the given frame.
    ///
    /// A degenerate (empty) frame is replaced with the default 50x30.
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        let frame = if frame.is_empty() {
            Rect::from_size(DEFAULT_SIZE)
        } else {
            frame
        };
        let mut switch = Self {
            value: false,
            active_track_color: Color::rgb(0.89, 0.89, 0.89),
            inactive_track_color: Color::TRANSPARENT,
            on_track_color: Color::rgb(0.3, 0.85, 0.39),
            border_color: Color::rgb(0.78, 0.78, 0.8),
            thumb_color: Color::WHITE,
            on_thumb_color: Color::WHITE,
            on_thumb_color_set: false,
            thumb_shadow_color: Color::GRAY,
            corner_style: CornerStyle::Rounded,
            on_image: None,
            off_image: None,
            thumb_image: None,
            accessible_name_value: None,
            test_id_value: None,
            bounds: frame,
            visual_value: false,
            dragging: false,
            drag_start_value: false,
            changed_during_drag: false,
            animating: false,
            track: Transition::default(),
            thumb: Transition::default(),
            on_icon: IconLayer::default(),
            off_icon: IconLayer::default(),
        };
        switch.show_off(false);
        switch
    }

    // ------------------------------------------------------------------
    // Builder-style configuration
    // ------------------------------------------------------------------

    /// Set the initial value (not animated).
    #[must_use]
    pub fn with_value(mut self, on: bool) -> Self {
        self.set_value(on, false);
        self
    }

    /// Set the drag-palette track color for the off side.
    #[must_use]
    pub fn with_active_track_color(mut self, color: Color) -> Self {
        self.set_active_track_color(color);
        self
    }

    /// Set the at-rest off track color.
    #[must_use]
    pub fn with_inactive_track_color(mut self, color: Color) -> Self {
        self.set_inactive_track_color(color);
        self
    }

    /// Set the on track color.
    #[must_use]
    pub fn with_on_track_color(mut self, color: Color) -> Self {
        self.set_on_track_color(color);
        self
    }

    /// Set the off-state border color.
    #[must_use]
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.set_border_color(color);
        self
    }

    /// Set the thumb color.
    #[must_use]
    pub fn with_thumb_color(mut self, color: Color) -> Self {
        self.set_thumb_color(color);
        self
    }

    /// Set an explicit on-state thumb color.
    #[must_use]
    pub fn with_on_thumb_color(mut self, color: Color) -> Self {
        self.set_on_thumb_color(color);
        self
    }

    /// Set the thumb shadow color.
    #[must_use]
    pub fn with_thumb_shadow_color(mut self, color: Color) -> Self {
        self.set_thumb_shadow_color(color);
        self
    }

    /// Set the corner style.
    #[must_use]
    pub fn with_corner_style(mut self, style: CornerStyle) -> Self {
        self.set_corner_style(style);
        self
    }

    /// Set the on-side icon.
    #[must_use]
    pub fn with_on_image(mut self, image: impl Into<String>) -> Self {
        self.set_on_image(image);
        self
    }

    /// Set the off-side icon.
    #[must_use]
    pub fn with_off_image(mut self, image: impl Into<String>) -> Self {
        self.set_off_image(image);
        self
    }

    /// Set the thumb icon.
    #[must_use]
    pub fn with_thumb_image(mut self, image: impl Into<String>) -> Self {
        self.set_thumb_image(image);
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // ------------------------------------------------------------------
    // Value
    // ------------------------------------------------------------------

    /// Get the committed value.
    #[must_use]
    pub const fn value(&self) -> bool {
        self.value
    }

    /// Set the committed value and render the matching visual state.
    ///
    /// Never emits [`SwitchChanged`]; only gesture completion does.
    pub fn set_value(&mut self, on: bool, animated: bool) {
        self.value = on;
        if on {
            self.show_on(animated);
        } else {
            self.show_off(animated);
        }
    }

    /// Last value actually rendered.
    #[must_use]
    pub const fn visual_value(&self) -> bool {
        self.visual_value
    }

    /// Whether a touch is currently being tracked.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether a transition animation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animating
    }

    /// Current corner style.
    #[must_use]
    pub const fn corner_style(&self) -> CornerStyle {
        self.corner_style
    }

    /// Current thumb frame in the control's local coordinate space.
    #[must_use]
    pub fn thumb_bounds(&self) -> Rect {
        self.thumb.value().frame
    }

    /// Current thumb corner radius.
    #[must_use]
    pub fn thumb_corner_radius(&self) -> f32 {
        self.thumb.value().radius
    }

    /// Current on-icon layer opacity.
    #[must_use]
    pub fn on_icon_opacity(&self) -> f32 {
        self.on_icon.layer.value().opacity
    }

    /// Current off-icon layer opacity.
    #[must_use]
    pub fn off_icon_opacity(&self) -> f32 {
        self.off_icon.layer.value().opacity
    }

    // ------------------------------------------------------------------
    // Style setters
    //
    // Each setter stores the raw value and repaints the affected layer
    // immediately only if that attribute is visible in the current
    // steady state (never during a drag).
    // ------------------------------------------------------------------

    /// Set the drag-palette track color for the off side.
    pub fn set_active_track_color(&mut self, color: Color) {
        // Visible only mid-drag; takes effect on the next tracking pass.
        self.active_track_color = color;
    }

    /// Set the at-rest off track color.
    pub fn set_inactive_track_color(&mut self, color: Color) {
        self.inactive_track_color = color;
        if !self.value && !self.dragging {
            self.track.override_with(move |v| v.fill = color);
        }
    }

    /// Set the on track color (also used for the border while on).
    pub fn set_on_track_color(&mut self, color: Color) {
        self.on_track_color = color;
        if self.value && !self.dragging {
            self.track.override_with(move |v| {
                v.fill = color;
                v.border = color;
            });
        }
    }

    /// Set the off-state border color.
    pub fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
        if !self.value && !self.dragging {
            self.track.override_with(move |v| v.border = color);
        }
    }

    /// Set the thumb color.
    ///
    /// Also updates the effective on-thumb color unless one was set
    /// explicitly.
    pub fn set_thumb_color(&mut self, color: Color) {
        if !self.on_thumb_color_set {
            self.on_thumb_color = color;
        }
        if (!self.on_thumb_color_set || !self.value) && !self.dragging {
            self.thumb.override_with(move |v| v.fill = color);
        }
        self.thumb_color = color;
    }

    /// Set an explicit on-state thumb color.
    pub fn set_on_thumb_color(&mut self, color: Color) {
        self.on_thumb_color = color;
        self.on_thumb_color_set = true;
        if self.value && !self.dragging {
            self.thumb.override_with(move |v| v.fill = color);
        }
    }

    /// Set the thumb shadow color.
    pub fn set_thumb_shadow_color(&mut self, color: Color) {
        self.thumb_shadow_color = color;
    }

    /// Set the corner style; track and thumb radii update immediately.
    pub fn set_corner_style(&mut self, style: CornerStyle) {
        self.corner_style = style;
        let track_radius = self.track_radius();
        let thumb_radius = self.thumb_radius();
        self.track.override_with(move |v| v.radius = track_radius);
        self.thumb.override_with(move |v| v.radius = thumb_radius);
    }

    /// Set the on-side icon.
    pub fn set_on_image(&mut self, image: impl Into<String>) {
        self.on_image = Some(image.into());
    }

    /// Set the off-side icon.
    pub fn set_off_image(&mut self, image: impl Into<String>) {
        self.off_image = Some(image.into());
    }

    /// Set the thumb icon.
    pub fn set_thumb_image(&mut self, image: impl Into<String>) {
        self.thumb_image = Some(image.into());
    }

    // ------------------------------------------------------------------
    // Gesture tracking
    // ------------------------------------------------------------------

    /// Begin tracking a touch that landed inside the control.
    ///
    /// Expands the thumb and switches to the drag palette. Always
    /// accepts the gesture.
    pub fn begin_tracking(&mut self, _point: Point) -> bool {
        self.drag_start_value = self.value;
        self.changed_during_drag = false;
        self.dragging = true;
        self.animating = true;

        let track = self.track_visual(self.value);
        let thumb = self.thumb_visual(self.value);
        self.track.animate_to(track, TRANSITION_SECS, Easing::EaseOut);
        self.thumb.animate_to(thumb, TRANSITION_SECS, Easing::EaseOut);
        true
    }

    /// Track a touch move; shows the side the touch is currently on.
    pub fn continue_tracking(&mut self, point: Point) -> bool {
        if !self.dragging {
            return false;
        }

        let on_side = point.x - self.bounds.x > self.bounds.width * 0.5;
        if on_side != self.visual_value {
            if on_side {
                self.show_on(true);
            } else {
                self.show_off(true);
            }
        }
        if on_side != self.drag_start_value {
            self.changed_during_drag = true;
        }
        true
    }

    /// Finish tracking and commit.
    ///
    /// If the drag crossed the midpoint at some point, commits the
    /// currently shown side; otherwise a plain tap inverts the value.
    /// Returns the change message iff the committed value differs from
    /// the value at gesture start.
    pub fn end_tracking(&mut self, _point: Point) -> Option<SwitchChanged> {
        if !self.dragging {
            return None;
        }

        let previous = self.value;
        self.dragging = false;
        if self.changed_during_drag {
            self.set_value(self.visual_value, true);
        } else {
            self.set_value(!self.value, true);
        }
        self.changed_during_drag = false;

        (previous != self.value).then_some(SwitchChanged { on: self.value })
    }

    /// Abort tracking; animates back to the committed value without
    /// firing a change message.
    pub fn cancel_tracking(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.changed_during_drag = false;
        if self.value {
            self.show_on(true);
        } else {
            self.show_off(true);
        }
    }

    // ------------------------------------------------------------------
    // Animation clock
    // ------------------------------------------------------------------

    /// Advance all in-flight transitions by `dt` seconds.
    ///
    /// `animating` clears as soon as the layer transitions land; the
    /// decorative bounce and spin effects keep ticking past that point
    /// and never hold up layout.
    pub fn tick(&mut self, dt: f64) {
        self.track.update(dt);
        self.thumb.update(dt);
        self.on_icon.update(dt);
        self.off_icon.update(dt);

        if self.animating
            && self.track.is_complete()
            && self.thumb.is_complete()
            && self.on_icon.layer.is_complete()
            && self.off_icon.layer.is_complete()
        {
            self.animating = false;
        }
    }

    // ------------------------------------------------------------------
    // Layout math
    // ------------------------------------------------------------------

    fn track_radius(&self) -> f32 {
        match self.corner_style {
            CornerStyle::Rounded => self.bounds.height * 0.5,
            CornerStyle::Square => SQUARE_RADIUS,
        }
    }

    fn thumb_radius(&self) -> f32 {
        match self.corner_style {
            CornerStyle::Rounded => self.bounds.height * 0.5 - THUMB_INSET,
            CornerStyle::Square => SQUARE_RADIUS,
        }
    }

    /// On/off icon frames: left and right regions of width (w - h).
    fn icon_frames(&self) -> (Rect, Rect) {
        let w = self.bounds.width;
        let h = self.bounds.height;
        (
            Rect::new(0.0, 0.0, w - h, h),
            Rect::new(h, 0.0, w - h, h),
        )
    }

    /// Thumb frame for the given side, optionally drag-expanded.
    fn thumb_frame(&self, on: bool, expanded: bool) -> Rect {
        let side = self.bounds.height - 2.0 * THUMB_INSET;
        let width = if expanded { side + DRAG_EXPANSION } else { side };
        let x = if on {
            self.bounds.width - (width + THUMB_INSET)
        } else {
            THUMB_INSET
        };
        Rect::new(x, THUMB_INSET, width, side)
    }

    fn track_visual(&self, on: bool) -> LayerVisual {
        let frame = Rect::from_size(self.bounds.size());
        if on {
            LayerVisual {
                frame,
                fill: self.on_track_color,
                border: self.on_track_color,
                radius: self.track_radius(),
                opacity: 1.0,
            }
        } else {
            LayerVisual {
                frame,
                fill: if self.dragging {
                    self.active_track_color
                } else {
                    self.inactive_track_color
                },
                border: self.border_color,
                radius: self.track_radius(),
                opacity: 1.0,
            }
        }
    }

    fn thumb_visual(&self, on: bool) -> LayerVisual {
        let fill = if on { self.on_thumb_color } else { self.thumb_color };
        LayerVisual {
            frame: self.thumb_frame(on, self.dragging),
            fill,
            border: fill,
            radius: self.thumb_radius(),
            opacity: 1.0,
        }
    }

    fn icon_visual(frame: Rect, visible: bool) -> LayerVisual {
        LayerVisual {
            frame,
            fill: Color::TRANSPARENT,
            border: Color::TRANSPARENT,
            radius: 0.0,
            opacity: if visible { 1.0 } else { 0.0 },
        }
    }

    // ------------------------------------------------------------------
    // Visual state
    // ------------------------------------------------------------------

    fn show_on(&mut self, animated: bool) {
        let track = self.track_visual(true);
        let thumb = self.thumb_visual(true);
        let (on_frame, off_frame) = self.icon_frames();
        let on_icon = Self::icon_visual(on_frame, true);
        let off_icon = Self::icon_visual(off_frame, false);

        if animated {
            self.animating = true;
            self.track.animate_to(track, TRANSITION_SECS, Easing::EaseOut);
            self.thumb.animate_to(thumb, TRANSITION_SECS, Easing::EaseOut);
            self.on_icon
                .layer
                .animate_to(on_icon, TRANSITION_SECS, Easing::EaseOut);
            self.off_icon
                .layer
                .animate_to(off_icon, TRANSITION_SECS, Easing::EaseOut);
            self.on_icon.play_bounce();
        } else {
            self.track.snap_to(track);
            self.thumb.snap_to(thumb);
            self.on_icon.layer.snap_to(on_icon);
            self.off_icon.layer.snap_to(off_icon);
            self.on_icon.clear_effects();
            self.off_icon.clear_effects();
            self.animating = false;
        }
        self.visual_value = true;
    }

    fn show_off(&mut self, animated: bool) {
        let track = self.track_visual(false);
        let thumb = self.thumb_visual(false);
        let (on_frame, off_frame) = self.icon_frames();
        let on_icon = Self::icon_visual(on_frame, false);
        let off_icon = Self::icon_visual(off_frame, true);

        if animated {
            self.animating = true;
            self.track.animate_to(track, TRANSITION_SECS, Easing::EaseOut);
            self.thumb.animate_to(thumb, TRANSITION_SECS, Easing::EaseOut);
            self.on_icon
                .layer
                .animate_to(on_icon, TRANSITION_SECS, Easing::EaseOut);
            self.off_icon
                .layer
                .animate_to(off_icon, TRANSITION_SECS, Easing::EaseOut);
            self.off_icon.play_spin();
        } else {
            self.track.snap_to(track);
            self.thumb.snap_to(thumb);
            self.on_icon.layer.snap_to(on_icon);
            self.off_icon.layer.snap_to(off_icon);
            self.on_icon.clear_effects();
            self.off_icon.clear_effects();
            self.animating = false;
        }
        self.visual_value = false;
    }

    /// Recompute child frames from the current bounds.
    ///
    /// Skipped while a transition is in flight; the completed
    /// transition already lands on the right geometry.
    fn relayout(&mut self) {
        if self.animating {
            return;
        }
        let track_frame = Rect::from_size(self.bounds.size());
        let track_radius = self.track_radius();
        // Layout always places the resting square thumb; only the drag
        // animation itself produces the expanded width.
        let thumb_frame = self.thumb_frame(self.value, false);
        let thumb_radius = self.thumb_radius();
        let (on_frame, off_frame) = self.icon_frames();

        self.track.override_with(move |v| {
            v.frame = track_frame;
            v.radius = track_radius;
        });
        self.thumb.override_with(move |v| {
            v.frame = thumb_frame;
            v.radius = thumb_radius;
        });
        self.on_icon.layer.override_with(move |v| v.frame = on_frame);
        self.off_icon.layer.override_with(move |v| v.frame = off_frame);
    }

    fn hit_test(&self, point: &Point) -> bool {
        self.bounds.contains_point(point)
    }

    fn paint_icon(&self, canvas: &mut dyn Canvas, icon: &IconLayer, image: Option<&str>) {
        let Some(source) = image else { return };
        let visual = icon.layer.value();
        if visual.opacity <= 0.0 {
            return;
        }
        let frame = visual.frame.offset(self.bounds.x, self.bounds.y);
        canvas.draw_image(
            source,
            frame,
            visual.opacity,
            icon.tint,
            icon.transform(frame.center()),
        );
    }
}

impl Widget for ToggleSwitch {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.bounds.size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.relayout();
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let track = self.track.value();
        let track_style = BoxStyle::fill(track.fill).with_stroke(StrokeStyle {
            color: track.border,
            width: BORDER_WIDTH,
        });
        canvas.rounded_rect(
            track.frame.offset(self.bounds.x, self.bounds.y),
            track.radius,
            &track_style,
        );

        self.paint_icon(canvas, &self.on_icon, self.on_image.as_deref());
        self.paint_icon(canvas, &self.off_icon, self.off_image.as_deref());

        let thumb = self.thumb.value();
        let thumb_frame = thumb.frame.offset(self.bounds.x, self.bounds.y);
        let thumb_style = BoxStyle::fill(thumb.fill).with_shadow(Shadow {
            color: self.thumb_shadow_color,
            offset_x: 0.0,
            offset_y: 3.0,
            blur: 2.0,
            opacity: 0.5,
        });
        canvas.rounded_rect(thumb_frame, thumb.radius, &thumb_style);

        if let Some(image) = self.thumb_image.as_deref() {
            canvas.draw_image(image, thumb_frame, 1.0, None, Transform2D::IDENTITY);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::TouchStart { position, .. } if self.hit_test(position) => {
                self.begin_tracking(*position);
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } if self.hit_test(position) => {
                self.begin_tracking(*position);
                None
            }
            Event::TouchMove { position, .. } | Event::MouseMove { position }
                if self.dragging =>
            {
                self.continue_tracking(*position);
                None
            }
            Event::TouchEnd { position, .. } if self.dragging => {
                self.end_tracking(*position)
                    .map(|msg| Box::new(msg) as Box<dyn Any + Send>)
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } if self.dragging => {
                self.end_tracking(*position)
                    .map(|msg| Box::new(msg) as Box<dyn Any + Send>)
            }
            Event::TouchCancel { .. } if self.dragging => {
                self.cancel_tracking();
                None
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Checkbox
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use togglekit_core::{DrawCommand, RecordingCanvas};

    const FRAME: f64 = 1.0 / 60.0;

    fn settle(switch: &mut ToggleSwitch) {
        for _ in 0..600 {
            switch.tick(FRAME);
            if !switch.is_animating() {
                break;
            }
        }
        assert!(!switch.is_animating(), "animation never settled");
    }

    // ===== Construction =====

    #[test]
    fn test_empty_frame_uses_default_size() {
        let switch = ToggleSwitch::new(Rect::default());
        assert_eq!(switch.bounds().size(), Size::new(50.0, 30.0));
        assert!(!switch.value());
    }

    #[test]
    fn test_explicit_frame_is_kept() {
        let switch = ToggleSwitch::new(Rect::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(switch.bounds(), Rect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_initial_state_is_off() {
        let switch = ToggleSwitch::new(Rect::default());
        assert!(!switch.visual_value());
        assert_eq!(switch.on_icon_opacity(), 0.0);
        assert_eq!(switch.off_icon_opacity(), 1.0);
    }

    #[test]
    fn test_builder() {
        let switch = ToggleSwitch::new(Rect::default())
            .with_value(true)
            .with_on_track_color(Color::rgb(0.0, 0.0, 1.0))
            .with_corner_style(CornerStyle::Square)
            .with_on_image("check")
            .with_off_image("cross")
            .with_accessible_name("Notifications")
            .with_test_id("notifications-switch");

        assert!(switch.value());
        assert_eq!(switch.corner_style(), CornerStyle::Square);
        assert_eq!(Widget::accessible_name(&switch), Some("Notifications"));
        assert_eq!(Widget::test_id(&switch), Some("notifications-switch"));
    }

    // ===== set_value =====

    #[test]
    fn test_set_value_idempotent() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.set_value(true, false);
        let before = switch.thumb_bounds();
        switch.set_value(true, false);
        assert_eq!(switch.thumb_bounds(), before);
        assert!(switch.value());
        assert!(!switch.is_animating());
    }

    #[test]
    fn test_set_value_unanimated_snaps() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.set_value(true, false);
        assert!(!switch.is_animating());
        assert_eq!(switch.on_icon_opacity(), 1.0);
        assert_eq!(switch.off_icon_opacity(), 0.0);
    }

    #[test]
    fn test_set_value_animated_settles_on_target() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.set_value(true, true);
        assert!(switch.is_animating());
        settle(&mut switch);
        assert_eq!(switch.thumb_bounds(), Rect::new(21.0, 1.0, 28.0, 28.0));
    }

    // ===== Layout determinism =====

    #[test]
    fn test_thumb_frame_off_at_rest() {
        let switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        assert_eq!(switch.thumb_bounds(), Rect::new(1.0, 1.0, 28.0, 28.0));
        assert_eq!(switch.thumb_corner_radius(), 14.0);
    }

    #[test]
    fn test_thumb_frame_on_at_rest() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.set_value(true, false);
        // x = width - (height - 1)
        assert_eq!(switch.thumb_bounds(), Rect::new(21.0, 1.0, 28.0, 28.0));
    }

    #[test]
    fn test_square_corner_radius() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.set_corner_style(CornerStyle::Square);
        assert_eq!(switch.thumb_corner_radius(), 2.0);
    }

    #[test]
    fn test_layout_recomputes_when_idle() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.layout(Rect::new(0.0, 0.0, 80.0, 40.0));
        assert_eq!(switch.thumb_bounds(), Rect::new(1.0, 1.0, 38.0, 38.0));
        assert_eq!(switch.thumb_corner_radius(), 19.0);
    }

    #[test]
    fn test_layout_suppressed_while_animating() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.set_value(true, true);
        let mid_flight = switch.thumb_bounds();
        switch.layout(Rect::new(0.0, 0.0, 80.0, 40.0));
        assert_eq!(switch.thumb_bounds(), mid_flight);
    }

    #[test]
    fn test_layout_honored_while_bounce_still_playing() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.set_value(true, true);
        // 0.5s: the 0.3s transitions have landed, the 1.0s bounce has not.
        for _ in 0..30 {
            switch.tick(FRAME);
        }
        assert!(!switch.is_animating());
        switch.layout(Rect::new(0.0, 0.0, 80.0, 40.0));
        assert_eq!(switch.thumb_bounds(), Rect::new(41.0, 1.0, 38.0, 38.0));
    }

    #[test]
    fn test_layout_mid_drag_places_resting_thumb() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        settle(&mut switch);
        switch.layout(Rect::new(0.0, 0.0, 80.0, 40.0));
        assert_eq!(switch.thumb_bounds(), Rect::new(1.0, 1.0, 38.0, 38.0));
    }

    // ===== Gesture tracking =====

    #[test]
    fn test_begin_tracking_expands_thumb() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        assert!(switch.begin_tracking(Point::new(5.0, 15.0)));
        settle(&mut switch);
        // width = (h - 2) + 5, still flush left while off
        assert_eq!(switch.thumb_bounds(), Rect::new(1.0, 1.0, 33.0, 28.0));
    }

    #[test]
    fn test_begin_tracking_expands_on_right_when_on() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.set_value(true, false);
        switch.begin_tracking(Point::new(45.0, 15.0));
        settle(&mut switch);
        // x = width - (expanded + 1)
        assert_eq!(switch.thumb_bounds(), Rect::new(16.0, 1.0, 33.0, 28.0));
    }

    #[test]
    fn test_continue_tracking_updates_visual_value_only() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        switch.continue_tracking(Point::new(40.0, 15.0));
        assert!(switch.visual_value());
        assert!(!switch.value());
    }

    #[test]
    fn test_midpoint_exactly_counts_as_off_side() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        switch.continue_tracking(Point::new(25.0, 15.0));
        assert!(!switch.visual_value());
    }

    #[test]
    fn test_tap_inverts_value() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        let msg = switch.end_tracking(Point::new(5.0, 15.0));
        assert_eq!(msg, Some(SwitchChanged { on: true }));
        assert!(switch.value());
    }

    #[test]
    fn test_drag_across_commits_shown_side() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        switch.continue_tracking(Point::new(40.0, 15.0));
        let msg = switch.end_tracking(Point::new(40.0, 15.0));
        assert_eq!(msg, Some(SwitchChanged { on: true }));
        assert!(switch.value());
    }

    #[test]
    fn test_drag_across_and_back_is_net_noop() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        switch.continue_tracking(Point::new(40.0, 15.0));
        switch.continue_tracking(Point::new(5.0, 15.0));
        let msg = switch.end_tracking(Point::new(5.0, 15.0));
        assert_eq!(msg, None);
        assert!(!switch.value());
    }

    #[test]
    fn test_cancel_reverts_without_message() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        switch.continue_tracking(Point::new(40.0, 15.0));
        assert!(switch.visual_value());
        switch.cancel_tracking();
        settle(&mut switch);
        assert!(!switch.value());
        assert!(!switch.visual_value());
        assert!(!switch.is_dragging());
    }

    #[test]
    fn test_end_tracking_without_begin_is_ignored() {
        let mut switch = ToggleSwitch::new(Rect::default());
        assert_eq!(switch.end_tracking(Point::new(5.0, 15.0)), None);
        assert!(!switch.value());
    }

    #[test]
    fn test_commit_lands_on_rest_frame() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        switch.continue_tracking(Point::new(40.0, 15.0));
        switch.end_tracking(Point::new(40.0, 15.0));
        settle(&mut switch);
        assert_eq!(switch.thumb_bounds(), Rect::new(21.0, 1.0, 28.0, 28.0));
    }

    // ===== Drag palette =====

    #[test]
    fn test_drag_palette_off_side() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        settle(&mut switch);
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { style, .. } => {
                assert_eq!(style.fill, Some(Color::rgb(0.89, 0.89, 0.89)));
            }
            other => panic!("Expected RoundedRect for track, got {other:?}"),
        }
    }

    // ===== Style setters =====

    #[test]
    fn test_on_track_color_deferred_while_off() {
        let mut switch = ToggleSwitch::new(Rect::default());
        let blue = Color::rgb(0.0, 0.0, 1.0);
        switch.set_on_track_color(blue);

        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { style, .. } => {
                assert_eq!(style.fill, Some(Color::TRANSPARENT));
            }
            other => panic!("Expected RoundedRect for track, got {other:?}"),
        }

        // Takes effect when the on state is next rendered.
        switch.set_value(true, false);
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { style, .. } => {
                assert_eq!(style.fill, Some(blue));
            }
            other => panic!("Expected RoundedRect for track, got {other:?}"),
        }
    }

    #[test]
    fn test_on_track_color_immediate_while_on() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.set_value(true, false);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        switch.set_on_track_color(blue);

        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { style, .. } => {
                assert_eq!(style.fill, Some(blue));
                assert_eq!(style.stroke.map(|s| s.color), Some(blue));
            }
            other => panic!("Expected RoundedRect for track, got {other:?}"),
        }
    }

    #[test]
    fn test_inactive_track_color_immediate_while_off() {
        let mut switch = ToggleSwitch::new(Rect::default());
        let gray = Color::rgb(0.2, 0.2, 0.2);
        switch.set_inactive_track_color(gray);

        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { style, .. } => {
                assert_eq!(style.fill, Some(gray));
            }
            other => panic!("Expected RoundedRect for track, got {other:?}"),
        }
    }

    #[test]
    fn test_thumb_color_tracks_on_thumb_until_overridden() {
        let mut switch = ToggleSwitch::new(Rect::default());
        let red = Color::rgb(1.0, 0.0, 0.0);
        switch.set_thumb_color(red);
        switch.set_value(true, false);
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        // Thumb is the second rounded rect.
        match &canvas.commands()[1] {
            DrawCommand::RoundedRect { style, .. } => {
                assert_eq!(style.fill, Some(red));
            }
            other => panic!("Expected RoundedRect for thumb, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_on_thumb_color_stops_propagation() {
        let mut switch = ToggleSwitch::new(Rect::default());
        let gold = Color::rgb(1.0, 0.8, 0.0);
        let red = Color::rgb(1.0, 0.0, 0.0);
        switch.set_on_thumb_color(gold);
        switch.set_thumb_color(red);
        switch.set_value(true, false);

        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[1] {
            DrawCommand::RoundedRect { style, .. } => {
                assert_eq!(style.fill, Some(gold));
            }
            other => panic!("Expected RoundedRect for thumb, got {other:?}"),
        }
    }

    #[test]
    fn test_setter_deferred_during_drag() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.begin_tracking(Point::new(5.0, 15.0));
        settle(&mut switch);
        let gray = Color::rgb(0.2, 0.2, 0.2);
        switch.set_inactive_track_color(gray);

        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { style, .. } => {
                // Still showing the drag palette, not the new color.
                assert_eq!(style.fill, Some(Color::rgb(0.89, 0.89, 0.89)));
            }
            other => panic!("Expected RoundedRect for track, got {other:?}"),
        }
    }

    // ===== Paint =====

    #[test]
    fn test_paint_without_images_is_track_and_thumb() {
        let switch = ToggleSwitch::new(Rect::default());
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        assert_eq!(canvas.command_count(), 2);
    }

    #[test]
    fn test_paint_draws_visible_icon_only() {
        let switch = ToggleSwitch::new(Rect::default())
            .with_on_image("check")
            .with_off_image("cross");
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        // Track, off icon (visible), thumb. The on icon is at opacity 0.
        assert_eq!(canvas.command_count(), 3);
        match &canvas.commands()[1] {
            DrawCommand::Image { source, .. } => assert_eq!(source, "cross"),
            other => panic!("Expected Image for off icon, got {other:?}"),
        }
    }

    #[test]
    fn test_paint_thumb_image_rides_thumb() {
        let mut switch = ToggleSwitch::new(Rect::default()).with_thumb_image("knob");
        switch.set_value(true, false);
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[2] {
            DrawCommand::Image { source, bounds, .. } => {
                assert_eq!(source, "knob");
                assert_eq!(*bounds, Rect::new(21.0, 1.0, 28.0, 28.0));
            }
            other => panic!("Expected Image for thumb icon, got {other:?}"),
        }
    }

    #[test]
    fn test_paint_offsets_by_bounds_origin() {
        let switch = ToggleSwitch::new(Rect::new(100.0, 50.0, 50.0, 30.0));
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { bounds, .. } => {
                assert_eq!(*bounds, Rect::new(100.0, 50.0, 50.0, 30.0));
            }
            other => panic!("Expected RoundedRect for track, got {other:?}"),
        }
    }

    #[test]
    fn test_paint_thumb_has_shadow() {
        let switch = ToggleSwitch::new(Rect::default());
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        match &canvas.commands()[1] {
            DrawCommand::RoundedRect { style, .. } => {
                let shadow = style.shadow.expect("thumb should carry a shadow");
                assert_eq!(shadow.color, Color::GRAY);
                assert_eq!(shadow.offset_y, 3.0);
                assert_eq!(shadow.opacity, 0.5);
            }
            other => panic!("Expected RoundedRect for thumb, got {other:?}"),
        }
    }

    fn painted_icon(switch: &ToggleSwitch, name: &str) -> (Option<Color>, Transform2D) {
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        canvas
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCommand::Image {
                    source,
                    tint,
                    transform,
                    ..
                } if source == name => Some((*tint, *transform)),
                _ => None,
            })
            .unwrap_or_else(|| panic!("icon {name} was not painted"))
    }

    #[test]
    fn test_bounce_paints_on_icon_white_and_scaled() {
        let mut switch = ToggleSwitch::new(Rect::default()).with_on_image("check");
        switch.set_value(true, true);
        // 0.35s: transition landed, bounce between its 0.9 and 1.15 frames.
        switch.tick(0.35);
        let (tint, transform) = painted_icon(&switch, "check");
        assert_eq!(tint, Some(Color::WHITE));
        assert_ne!(transform, Transform2D::IDENTITY);
    }

    #[test]
    fn test_spin_paints_off_icon_gray_and_rotated() {
        let mut switch = ToggleSwitch::new(Rect::default()).with_off_image("cross");
        switch.set_value(true, false);
        switch.set_value(false, true);
        switch.tick(0.35);
        let (tint, transform) = painted_icon(&switch, "cross");
        assert_eq!(tint, Some(Color::GRAY));
        assert_ne!(transform, Transform2D::IDENTITY);
    }

    // ===== Event mapping =====

    #[test]
    fn test_event_down_outside_does_not_track() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        let result = switch.event(&Event::MouseDown {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(result.is_none());
        assert!(!switch.is_dragging());
    }

    #[test]
    fn test_event_right_button_ignored() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        let result = switch.event(&Event::MouseDown {
            position: Point::new(25.0, 15.0),
            button: MouseButton::Right,
        });
        assert!(result.is_none());
        assert!(!switch.is_dragging());
    }

    #[test]
    fn test_event_non_left_release_keeps_drag_alive() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        switch.event(&Event::MouseDown {
            position: Point::new(10.0, 15.0),
            button: MouseButton::Left,
        });
        let result = switch.event(&Event::MouseUp {
            position: Point::new(40.0, 15.0),
            button: MouseButton::Right,
        });
        assert!(result.is_none());
        assert!(switch.is_dragging());

        let result = switch.event(&Event::MouseUp {
            position: Point::new(40.0, 15.0),
            button: MouseButton::Left,
        });
        assert!(result.is_some());
        assert!(!switch.is_dragging());
    }

    #[test]
    fn test_event_move_without_drag_ignored() {
        let mut switch = ToggleSwitch::new(Rect::new(0.0, 0.0, 50.0, 30.0));
        let result = switch.event(&Event::MouseMove {
            position: Point::new(40.0, 15.0),
        });
        assert!(result.is_none());
        assert!(!switch.visual_value());
    }

    // ===== Icon opacity invariant =====

    #[test]
    fn test_exactly_one_icon_opaque_at_rest() {
        let mut switch = ToggleSwitch::new(Rect::default());
        for on in [false, true, false] {
            switch.set_value(on, false);
            let opacities = (switch.on_icon_opacity(), switch.off_icon_opacity());
            assert_eq!(opacities, if on { (1.0, 0.0) } else { (0.0, 1.0) });
        }
    }

    #[test]
    fn test_icons_cross_fade_mid_transition() {
        let mut switch = ToggleSwitch::new(Rect::default());
        switch.set_value(true, true);
        switch.tick(0.1);
        let on = switch.on_icon_opacity();
        let off = switch.off_icon_opacity();
        assert!(on > 0.0 && on < 1.0, "on icon mid-fade, got {on}");
        assert!(off > 0.0 && off < 1.0, "off icon mid-fade, got {off}");
    }

    // ===== Serde =====

    #[test]
    fn test_style_serde_roundtrip() {
        let switch = ToggleSwitch::new(Rect::default())
            .with_on_track_color(Color::rgb(0.0, 0.0, 1.0))
            .with_corner_style(CornerStyle::Square)
            .with_on_image("check");
        let json = serde_json::to_string(&switch).unwrap();
        let back: ToggleSwitch = serde_json::from_str(&json).unwrap();
        assert_eq!(back.corner_style(), CornerStyle::Square);
        assert!(!back.value());
    }
}
