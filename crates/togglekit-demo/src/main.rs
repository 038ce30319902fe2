//! Headless demo driving two toggle switches through scripted gestures.
//!
//! Paints into a [`RecordingCanvas`] each step and logs the draw
//! command inventory plus every change message, so the full visual
//! state machine can be observed without a windowing backend.

use togglekit_core::{
    Color, Event, MouseButton, Point, Rect, RecordingCanvas, TouchId, Widget,
};
use togglekit_widgets::{CornerStyle, SwitchChanged, ToggleSwitch};
use tracing::{info, Level};

const FRAME: f64 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut stock = ToggleSwitch::new(Rect::new(20.0, 20.0, 50.0, 30.0))
        .with_accessible_name("Notifications")
        .with_test_id("stock-switch");

    let mut styled = ToggleSwitch::new(Rect::new(20.0, 70.0, 100.0, 50.0))
        .with_corner_style(CornerStyle::Square)
        .with_on_track_color(Color::rgb(0.0, 0.46, 0.89))
        .with_on_image("check")
        .with_off_image("cross")
        .with_accessible_name("Dark mode")
        .with_test_id("styled-switch");

    info!("tap the stock switch");
    dispatch(
        &mut stock,
        &Event::TouchStart {
            id: TouchId(1),
            position: Point::new(30.0, 35.0),
            pressure: 1.0,
        },
    );
    dispatch(
        &mut stock,
        &Event::TouchEnd {
            id: TouchId(1),
            position: Point::new(30.0, 35.0),
        },
    );
    run(&mut stock, "stock");

    info!("drag the styled switch across");
    dispatch(
        &mut styled,
        &Event::MouseDown {
            position: Point::new(30.0, 95.0),
            button: MouseButton::Left,
        },
    );
    for x in [45.0, 60.0, 80.0, 100.0] {
        dispatch(
            &mut styled,
            &Event::MouseMove {
                position: Point::new(x, 95.0),
            },
        );
        styled.tick(FRAME);
    }
    dispatch(
        &mut styled,
        &Event::MouseUp {
            position: Point::new(100.0, 95.0),
            button: MouseButton::Left,
        },
    );
    run(&mut styled, "styled");

    info!("drag back without crossing, then release");
    dispatch(
        &mut styled,
        &Event::MouseDown {
            position: Point::new(90.0, 95.0),
            button: MouseButton::Left,
        },
    );
    dispatch(
        &mut styled,
        &Event::MouseMove {
            position: Point::new(80.0, 95.0),
        },
    );
    dispatch(
        &mut styled,
        &Event::MouseUp {
            position: Point::new(80.0, 95.0),
            button: MouseButton::Left,
        },
    );
    run(&mut styled, "styled");

    info!("start a drag on the stock switch and cancel it");
    dispatch(
        &mut stock,
        &Event::TouchStart {
            id: TouchId(2),
            position: Point::new(60.0, 35.0),
            pressure: 1.0,
        },
    );
    dispatch(
        &mut stock,
        &Event::TouchMove {
            id: TouchId(2),
            position: Point::new(30.0, 35.0),
            pressure: 1.0,
        },
    );
    dispatch(&mut stock, &Event::TouchCancel { id: TouchId(2) });
    run(&mut stock, "stock");

    info!(
        stock = stock.value(),
        styled = styled.value(),
        "final committed values"
    );
}

/// Send one event, logging any change message it produces.
fn dispatch(switch: &mut ToggleSwitch, event: &Event) {
    if let Some(msg) = switch.event(event) {
        if let Some(changed) = msg.downcast_ref::<SwitchChanged>() {
            info!(
                name = switch.accessible_name().unwrap_or("switch"),
                on = changed.on,
                "switch changed"
            );
        }
    }
}

/// Run the animation clock until the switch settles, painting each frame.
fn run(switch: &mut ToggleSwitch, label: &str) {
    let mut frames = 0u32;
    while switch.is_animating() && frames < 600 {
        switch.tick(FRAME);
        frames += 1;
    }

    let mut canvas = RecordingCanvas::new();
    switch.paint(&mut canvas);
    info!(
        label,
        frames,
        commands = canvas.command_count(),
        value = switch.value(),
        thumb = ?switch.thumb_bounds(),
        "settled"
    );
}
