use neon_folio::utils::{
    clamp,
    color::{Color3, hex_to_rgb, rgb_to_hex},
    device::{DeviceClass, gpu_name, is_desktop, is_mobile, is_tablet},
    distance,
    easing::{ease_in_out_cubic, ease_in_out_quart, ease_out_back, ease_out_elastic, ease_out_quart},
    lerp, map_range, normalize, parse_index, random_int, random_range, scroll_percentage,
    smooth_towards,
};
use rand::{SeedableRng, rngs::StdRng};

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";
const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X710) Safari/537.36";
const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[test]
fn easing_curves_should_hit_both_endpoints() {
    for ease in [
        ease_in_out_cubic,
        ease_out_quart,
        ease_in_out_quart,
        ease_out_elastic,
        ease_out_back,
    ] {
        assert!(ease(0.0).abs() < 1e-5);
        assert!((ease(1.0) - 1.0).abs() < 1e-5);
    }
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-5);
    assert!(ease_out_back(0.8) > 1.0);
}

#[test]
fn interpolation_helpers() {
    assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
    assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
    assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
    assert_eq!(map_range(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
    assert_eq!(map_range(0.0, -1.0, 1.0, 0.0, 1.0), 0.5);
}

#[test]
fn smoothing_should_not_overshoot_and_stay_on_target() {
    assert_eq!(smooth_towards(3.0, 3.0, 0.1), 3.0);
    let mut v = 0.0;
    for _ in 0..100 {
        v = smooth_towards(v, 1.0, 0.1);
        assert!(v <= 1.0);
    }
    assert!((v - 1.0).abs() < 1e-4);
}

#[test]
fn random_helpers_should_respect_bounds() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let f = random_range(&mut rng, -2.0, 3.0);
        assert!((-2.0..3.0).contains(&f));
        let i = random_int(&mut rng, 1, 3);
        assert!((1..=3).contains(&i));
    }
}

#[test]
fn scroll_percentage_should_handle_short_pages() {
    assert_eq!(scroll_percentage(0.0, 2000.0, 1000.0), 0.0);
    assert_eq!(scroll_percentage(500.0, 2000.0, 1000.0), 50.0);
    assert_eq!(scroll_percentage(1000.0, 2000.0, 1000.0), 100.0);
    assert_eq!(scroll_percentage(0.0, 800.0, 1000.0), 0.0);
    assert_eq!(scroll_percentage(10.0, 1000.0, 1000.0), 0.0);
}

#[test]
fn parse_index_should_read_leading_digits() {
    assert_eq!(parse_index(None), 0);
    assert_eq!(parse_index(Some("3")), 3);
    assert_eq!(parse_index(Some("  12px")), 12);
    assert_eq!(parse_index(Some("-2")), -2);
    assert_eq!(parse_index(Some("abc")), 0);
    assert_eq!(parse_index(Some("")), 0);
}

#[test]
fn vector_helpers() {
    assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
    assert_eq!(normalize(0.0, 0.0), (0.0, 0.0));
    let (x, y) = normalize(3.0, 4.0);
    assert!((x - 0.6).abs() < 1e-6 && (y - 0.8).abs() < 1e-6);
}

#[test]
fn colours_should_convert_between_hex_and_rgb() {
    assert_eq!(hex_to_rgb("#ff0000"), Some(Color3::new(1.0, 0.0, 0.0)));
    assert_eq!(hex_to_rgb("00FF00"), Some(Color3::new(0.0, 1.0, 0.0)));
    assert_eq!(hex_to_rgb("#fff"), None);
    assert_eq!(hex_to_rgb("#gg0000"), None);
    assert_eq!(rgb_to_hex(0, 240, 255), "#00f0ff");
    assert_eq!(Color3::from_hex_srgb(0x0000ff).to_array(), [0.0, 0.0, 1.0]);
}

#[test]
fn hex_literals_should_decode_to_linear_light() {
    let blue = Color3::from_hex(0x0000ff);
    assert_eq!((blue.r, blue.g), (0.0, 0.0));
    assert!((blue.b - 1.0).abs() < 1e-5);

    // mid grey is about a fifth of full intensity once decoded
    let grey = Color3::from_hex(0x808080);
    assert!((grey.r - 0.2158).abs() < 1e-3, "got {}", grey.r);
    assert!((hex_to_rgb("#808080").map(|c| c.r).unwrap_or_default() - 0.502).abs() < 1e-3);

    // the page background stays almost black
    let bg = Color3::from_hex(0x0a0a0f);
    assert!(bg.r < Color3::from_hex_srgb(0x0a0a0f).r);
    assert!(bg.b < 0.005);
}

#[test]
fn devices_should_be_classified_from_the_user_agent() {
    assert!(is_mobile(IPHONE));
    assert!(is_mobile(ANDROID_PHONE));
    assert!(!is_tablet(ANDROID_PHONE));
    assert!(is_tablet(ANDROID_TABLET));
    assert!(is_desktop(DESKTOP));

    assert_eq!(DeviceClass::from_user_agent(IPHONE), DeviceClass::Mobile);
    assert_eq!(DeviceClass::from_user_agent(ANDROID_TABLET), DeviceClass::Tablet);
    assert_eq!(DeviceClass::from_user_agent(DESKTOP), DeviceClass::Desktop);
    assert_eq!(gpu_name(None), None);
}
