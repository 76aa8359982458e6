/// Tests for Material: colors, map slots and the tex-coord algebra.

use super::*;
use crate::graphics_device::TextureHandle;
use std::time::Duration;

fn texture(id: u32) -> Arc<Texture> {
    Arc::new(Texture::new(TextureHandle::tex_2d(id), 64, 64))
}

#[test]
fn test_defaults() {
    let material = Material::new("plain");
    assert_eq!(material.name(), "plain");
    assert_eq!(material.diffuse_color(), Color::WHITE);
    assert_eq!(material.emissive_color(), Color::BLACK);
    assert_eq!(material.shininess(), 32.0);
    assert_eq!(material.tex_coords(), (Vec2::ZERO, Vec2::ONE));
    assert!(!material.is_cropped());
    assert!(!material.is_repeated());
}

#[test]
fn test_diffuse_color_tracks_ambient() {
    let mut material = Material::new("m");
    // Ambient follows diffuse while they are equal
    material.set_diffuse_color(Color::RED);
    assert_eq!(material.ambient_color(), Color::RED);

    // Once decoupled, ambient stays put
    material.set_ambient_color(Color::BLUE);
    material.set_diffuse_color(Color::GREEN);
    assert_eq!(material.ambient_color(), Color::BLUE);
}

#[test]
fn test_emissive_map_side_effect() {
    let mut material = Material::new("m");
    assert_eq!(material.emissive_color(), Color::BLACK);

    material.set_emissive_map(TextureMap::Texture(texture(1)));
    assert_eq!(material.emissive_color(), Color::WHITE);

    material.set_emissive_map(TextureMap::None);
    assert_eq!(material.emissive_color(), Color::BLACK);

    // A user-set emissive color is left alone
    material.set_emissive_color(Color::RED);
    material.set_emissive_map(TextureMap::Texture(texture(2)));
    assert_eq!(material.emissive_color(), Color::RED);
}

#[test]
fn test_flip_round_trip() {
    let mut material = Material::new("m");
    material.crop(Some(Rect::new(Vec2::new(0.25, 0.25), Vec2::new(0.75, 0.5))));
    let before = material.tex_coords();

    material.flip_horizontal();
    assert!(material.is_flipped_horizontally());
    material.flip_horizontal();
    assert_eq!(material.tex_coords(), before);

    material.flip_vertical();
    assert!(material.is_flipped_vertically());
    material.flip_vertical();
    assert_eq!(material.tex_coords(), before);
}

#[test]
fn test_crop_unit_square_round_trip() {
    let mut material = Material::new("m");
    let before = material.tex_coords();

    material.crop(Some(Rect::new(Vec2::new(0.1, 0.2), Vec2::new(0.9, 0.8))));
    assert!(material.is_cropped());
    assert_ne!(material.tex_coords(), before);

    material.crop(Some(Rect::UNIT));
    assert_eq!(material.tex_coords(), before);
}

#[test]
fn test_crop_preserves_flip_state() {
    let mut material = Material::new("m");
    material.flip_horizontal();

    material.crop(Some(Rect::new(Vec2::new(0.25, 0.0), Vec2::new(0.75, 1.0))));
    assert!(material.is_flipped_horizontally());
    assert!(material.is_cropped());

    let (ll, ur) = material.tex_coords();
    assert_eq!(ll.x, 0.75);
    assert_eq!(ur.x, 0.25);
}

#[test]
fn test_crop_clamps_area() {
    let mut material = Material::new("m");
    material.crop(Some(Rect::new(Vec2::new(-1.0, 0.5), Vec2::new(2.0, 3.0))));
    assert_eq!(material.tex_coords(), (Vec2::new(0.0, 0.5), Vec2::new(1.0, 1.0)));
}

#[test]
fn test_repeat_discards_crop() {
    let mut material = Material::new("m");
    material.crop(Some(Rect::new(Vec2::new(0.25, 0.25), Vec2::new(0.75, 0.75))));

    material.repeat(Some(Vec2::new(3.0, 2.0)));
    assert!(material.is_repeated());
    assert!(!material.is_cropped());
    assert_eq!(material.tex_coords(), (Vec2::ZERO, Vec2::new(3.0, 2.0)));

    material.repeat(None);
    assert!(!material.is_repeated());
    assert_eq!(material.tex_coords(), (Vec2::ZERO, Vec2::ONE));
}

#[test]
fn test_repeat_rejects_non_positive_amount() {
    let mut material = Material::new("m");
    let before = material.tex_coords();
    material.repeat(Some(Vec2::new(0.0, 2.0)));
    assert_eq!(material.tex_coords(), before);
}

#[test]
fn test_world_tex_coords_composes_with_atlas_region() {
    let atlas_texture = Arc::new(
        Texture::new(TextureHandle::tex_2d(1), 256, 256)
            .with_tex_coords(Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.5)),
    );
    let mut material = Material::with_diffuse_map("m", atlas_texture);

    // Whole relative rect maps straight onto the region
    assert_eq!(
        material.world_tex_coords(),
        (Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.5))
    );

    // A crop narrows within the region
    material.crop(Some(Rect::new(Vec2::new(0.5, 0.5), Vec2::ONE)));
    assert_eq!(
        material.world_tex_coords(),
        (Vec2::new(0.75, 0.25), Vec2::new(1.0, 0.5))
    );
}

#[test]
fn test_map_resolution_by_time() {
    let frames = vec![texture(1), texture(2)];
    let animation = Arc::new(Animation::new(frames, Duration::from_millis(100)));
    let material = Material::with_diffuse_animation("m", animation);

    assert_eq!(material.diffuse_map_at(Duration::ZERO).unwrap().handle().id, 1);
    assert_eq!(
        material.diffuse_map_at(Duration::from_millis(150)).unwrap().handle().id,
        2
    );
    assert!(material.normal_map_at(Duration::ZERO).is_none());
}

#[test]
fn test_is_repeatable_reads_first_frame() {
    use crate::textures::TextureWrap;

    let repeatable = Arc::new(
        Texture::new(TextureHandle::tex_2d(1), 64, 64)
            .with_wrap(TextureWrap::Repeat, TextureWrap::Clamp),
    );
    let material = Material::with_diffuse_map("m", repeatable);
    assert_eq!(material.is_repeatable(), (true, false));

    let bare = Material::new("bare");
    assert_eq!(bare.is_repeatable(), (false, false));
}
