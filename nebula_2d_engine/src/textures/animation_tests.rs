/// Tests for Animation.

use super::*;
use crate::graphics_device::TextureHandle;

fn frames(count: u32) -> Vec<Arc<Texture>> {
    (0..count)
        .map(|i| Arc::new(Texture::new(TextureHandle::tex_2d(i + 1), 32, 32)))
        .collect()
}

#[test]
fn test_frame_at_loops() {
    let animation = Animation::new(frames(4), Duration::from_millis(100));

    assert_eq!(animation.frame_at(Duration::ZERO).unwrap().handle().id, 1);
    assert_eq!(animation.frame_at(Duration::from_millis(150)).unwrap().handle().id, 2);
    assert_eq!(animation.frame_at(Duration::from_millis(350)).unwrap().handle().id, 4);
    // Wraps around
    assert_eq!(animation.frame_at(Duration::from_millis(450)).unwrap().handle().id, 1);
}

#[test]
fn test_bounded_animation_holds_last_frame() {
    let animation =
        Animation::new(frames(3), Duration::from_millis(100)).with_repeat_count(Some(0));

    assert_eq!(animation.total_duration(), Some(Duration::from_millis(300)));
    assert_eq!(animation.frame_at(Duration::from_millis(250)).unwrap().handle().id, 3);
    // Past the end: last frame holds
    assert_eq!(animation.frame_at(Duration::from_secs(10)).unwrap().handle().id, 3);
}

#[test]
fn test_reverse_direction() {
    let animation = Animation::new(frames(3), Duration::from_millis(100))
        .with_direction(PlaybackDirection::Reverse);

    assert_eq!(animation.frame_at(Duration::ZERO).unwrap().handle().id, 3);
    assert_eq!(animation.frame_at(Duration::from_millis(100)).unwrap().handle().id, 2);
    assert_eq!(animation.frame_at(Duration::from_millis(200)).unwrap().handle().id, 1);
}

#[test]
fn test_cursor_elapse_and_controls() {
    let mut animation = Animation::new(frames(2), Duration::from_millis(100));

    assert_eq!(animation.current_frame().unwrap().handle().id, 1);

    animation.elapse(Duration::from_millis(120));
    assert_eq!(animation.current_frame().unwrap().handle().id, 2);

    animation.stop();
    animation.elapse(Duration::from_millis(100));
    assert_eq!(animation.time(), Duration::from_millis(120));

    animation.start();
    animation.reset();
    assert_eq!(animation.current_frame().unwrap().handle().id, 1);
}

#[test]
fn test_empty_animation_has_no_frames() {
    let animation = Animation::new(Vec::new(), Duration::from_millis(100));
    assert!(animation.frame_at(Duration::ZERO).is_none());
    assert!(animation.first_frame().is_none());
}

#[test]
fn test_is_done() {
    let mut animation =
        Animation::new(frames(2), Duration::from_millis(50)).with_repeat_count(Some(1));

    assert!(!animation.is_done());
    animation.elapse(Duration::from_millis(200));
    assert!(animation.is_done());
}
