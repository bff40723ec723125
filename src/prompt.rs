/// Features every reimagined city is asked to include, in template order.
const FUTURE_FEATURES: [&str; 5] = [
    "taller skyscrapers",
    "advanced architecture",
    "more green spaces",
    "futuristic transportation systems",
    "eco-friendly buildings",
];

/// Builds the generation prompt from the vision service's description and
/// tags. Pure string templating; no escaping or length limits are applied,
/// an over-long prompt is the generation service's problem.
pub fn build_future_city_prompt(description: &str, tags: &[String]) -> String {
    format!(
        "A futuristic version of a city that includes {}. The city has {}. \
         Key features from the original city include: {}.",
        description,
        FUTURE_FEATURES.join(", "),
        tags.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_expected_template() {
        let tags = vec!["skyline".to_string(), "bridge".to_string()];
        let prompt = build_future_city_prompt("a busy harbor city", &tags);
        assert_eq!(
            prompt,
            "A futuristic version of a city that includes a busy harbor city. \
             The city has taller skyscrapers, advanced architecture, more green spaces, \
             futuristic transportation systems, eco-friendly buildings. \
             Key features from the original city include: skyline, bridge."
        );
    }

    #[test]
    fn contains_description_and_joined_tags() {
        let tags = vec![
            "water".to_string(),
            "boat".to_string(),
            "harbor".to_string(),
        ];
        let prompt = build_future_city_prompt("an old port town", &tags);
        assert!(prompt.contains("an old port town"));
        assert!(prompt.contains("water, boat, harbor"));
        for feature in FUTURE_FEATURES {
            assert!(prompt.contains(feature));
        }
    }

    #[test]
    fn is_deterministic() {
        let tags = vec!["tower".to_string()];
        assert_eq!(
            build_future_city_prompt("a skyline at dusk", &tags),
            build_future_city_prompt("a skyline at dusk", &tags)
        );
    }

    #[test]
    fn handles_empty_tag_list() {
        let prompt = build_future_city_prompt("a cityscape", &[]);
        assert!(prompt.ends_with("Key features from the original city include: ."));
    }
}
