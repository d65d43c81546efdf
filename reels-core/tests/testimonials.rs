use reels_config::RuntimeConfig;
use reels_core::TestimonialMarquee;
use reels_core::sim::SimTestimonials;

#[test]
fn duplicates_items_once_and_observes_with_margin() {
    let gate = TestimonialMarquee::setup(
        SimTestimonials::new(5),
        &RuntimeConfig::default(),
    )
    .expect("marquee present");
    let surface = gate.surface();
    assert_eq!(surface.items, 10);
    assert!(surface.duplicated);
    assert_eq!(surface.observed_margin, Some(-100.0));
    assert!(!gate.is_active());
}

#[test]
fn setup_on_a_duplicated_track_does_not_clone_again() {
    let mut markup = SimTestimonials::new(4);
    markup.items = 8;
    markup.duplicated = true;
    let gate = TestimonialMarquee::setup(markup, &RuntimeConfig::default())
        .expect("marquee present");
    assert_eq!(gate.surface().items, 8);
}

#[test]
fn missing_markup_is_a_no_op() {
    let mut markup = SimTestimonials::new(3);
    markup.present = false;
    assert!(
        TestimonialMarquee::setup(markup, &RuntimeConfig::default()).is_none()
    );
}

#[test]
fn visibility_toggles_the_active_class() {
    let config = RuntimeConfig {
        testimonial_root_margin_bottom: Some(-40.0),
        ..RuntimeConfig::default()
    };
    let mut gate = TestimonialMarquee::setup(SimTestimonials::new(3), &config)
        .expect("marquee present");
    assert_eq!(gate.surface().observed_margin, Some(-40.0));

    gate.on_intersection(true);
    assert!(gate.is_active());
    let classes: Vec<&str> = gate
        .surface()
        .track_classes
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(classes, vec!["active"]);
    gate.on_intersection(false);
    assert!(gate.surface().track_classes.is_empty());

    gate.destroy();
    assert_eq!(gate.surface().observed_margin, None);
    gate.on_intersection(true);
    assert!(!gate.surface().track_has_class("active"));
}
