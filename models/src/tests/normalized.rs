use crate::NormalizedResponse;

#[test]
fn given_blank_summary_when_creating_then_fallback_summary_is_used() {
    let response = NormalizedResponse::new("  ", vec![String::from("1. x")]);

    assert_eq!(response.summary(), "No data available");
    assert_eq!(response.details().len(), 1);
}

#[test]
fn given_details_when_rendering_then_one_line_each_after_summary() {
    let response = NormalizedResponse::new(
        "User settings:",
        vec![String::from("- a: enabled"), String::from("- b: disabled")],
    );

    assert_eq!(response.render(), "User settings:\n- a: enabled\n- b: disabled");
    assert_eq!(NormalizedResponse::summary_only("Web access: Enabled").render(), "Web access: Enabled");
}
