use super::*;

#[test]
fn rejects_mismatched_or_empty_buffers() {
    assert!(ParticleField::new(0, 2, vec![]).is_err());
    assert!(ParticleField::new(2, 2, vec![1.0; 3]).is_err());
    assert!(ParticleField::new(1, 1, vec![f32::NAN]).is_err());
}

#[test]
fn u8_samples_normalize_to_unit_range() {
    let f = ParticleField::from_u8(2, 1, &[0, 255]).unwrap();
    assert_eq!(f.opacity(0, 0), Some(0.0));
    assert_eq!(f.opacity(1, 0), Some(1.0));
}

#[test]
fn out_of_range_samples_are_clamped() {
    let f = ParticleField::new(2, 1, vec![-0.5, 3.0]).unwrap();
    assert_eq!(f.opacity(0, 0), Some(0.0));
    assert_eq!(f.opacity(1, 0), Some(1.0));
}

#[test]
fn rgba_uses_alpha_only() {
    let f = ParticleField::from_rgba8_alpha(2, 1, &[255, 255, 255, 0, 0, 0, 0, 200]).unwrap();
    assert!(!f.is_opaque(0, 0));
    assert!(f.is_opaque(1, 0));
    assert!(ParticleField::from_rgba8_alpha(1, 1, &[1, 2, 3]).is_err());
}

#[test]
fn lookups_outside_the_field_are_none() {
    let f = ParticleField::new(2, 2, vec![1.0; 4]).unwrap();
    assert_eq!(f.opacity(-1, 0), None);
    assert_eq!(f.opacity(0, 2), None);
    assert!(!f.is_opaque(2, 0));
    assert_eq!(f.opaque_count(), 4);
}

#[test]
fn from_fn_samples_pixel_centers() {
    let f = ParticleField::from_fn(3, 1, |x, _| if x > 1.0 { 1.0 } else { 0.0 }).unwrap();
    assert_eq!(f.opaque_count(), 2);
    assert!(!f.is_opaque(0, 0));
}
