//! Mock generation contract: fixed content, bounds, and latencies.
//!
//! Every "AI" action in the pipeline resolves to deterministic templated
//! content after a fixed delay. The content and bounds live here as pure
//! functions so the async engine in the API crate only owns scheduling
//! and cancellation; a real model integration would replace this module
//! without touching the engine's state handling.

use crate::error::CoreError;
use crate::project::{Character, DialogLine, Scene, TransitionImage};

// ---------------------------------------------------------------------------
// Latency constants
// ---------------------------------------------------------------------------

/// Simulated latency of narrative enhancement, in milliseconds.
pub const ENHANCE_DELAY_MS: u64 = 2_000;
/// Simulated latency of character generation.
pub const CHARACTERS_DELAY_MS: u64 = 3_000;
/// Simulated latency of scene generation.
pub const SCENES_DELAY_MS: u64 = 3_000;
/// Simulated latency of per-scene transition image generation.
pub const SCENE_IMAGES_DELAY_MS: u64 = 2_000;
/// Simulated latency of the portrait prompt workshop.
pub const PORTRAIT_PROMPT_DELAY_MS: u64 = 2_000;
/// Simulated latency of the portrait image workshop.
pub const PORTRAIT_IMAGE_DELAY_MS: u64 = 3_000;

// ---------------------------------------------------------------------------
// Scene count bounds
// ---------------------------------------------------------------------------

/// Smallest scene count accepted anywhere.
pub const MIN_SCENE_COUNT: u32 = 3;
/// Largest scene count accepted by the story-creation wizard.
pub const MAX_SCENE_COUNT_WIZARD: u32 = 12;
/// Largest scene count accepted by the story-development workshop.
pub const MAX_SCENE_COUNT_WORKSHOP: u32 = 20;
/// Scene count used when none is supplied.
pub const DEFAULT_SCENE_COUNT: u32 = 5;

/// Number of transition images generated per scene.
pub const IMAGES_PER_SCENE: usize = 4;

fn validate_scene_count(count: u32, max: u32) -> Result<(), CoreError> {
    if count < MIN_SCENE_COUNT || count > max {
        return Err(CoreError::Validation(format!(
            "scene count must be between {MIN_SCENE_COUNT} and {max}, got {count}"
        )));
    }
    Ok(())
}

/// Validate a scene count entered on the story-creation wizard (3-12).
pub fn validate_wizard_scene_count(count: u32) -> Result<(), CoreError> {
    validate_scene_count(count, MAX_SCENE_COUNT_WIZARD)
}

/// Validate a scene count override on scene generation (3-20, the
/// story-development workshop's wider range).
pub fn validate_workshop_scene_count(count: u32) -> Result<(), CoreError> {
    validate_scene_count(count, MAX_SCENE_COUNT_WORKSHOP)
}

// ---------------------------------------------------------------------------
// Narrative enhancement
// ---------------------------------------------------------------------------

/// Produce the enhanced narrative for a concept.
///
/// An empty or whitespace-only concept is rejected with a field-level
/// validation error; the caller's `enhanced_narrative` stays unset.
pub fn enhance_narrative(title: &str, concept: &str, scene_count: u32) -> Result<String, CoreError> {
    if concept.trim().is_empty() {
        return Err(CoreError::Validation(
            "Story concept must not be empty".to_string(),
        ));
    }
    Ok(format!(
        "{title}\n\nA compelling narrative exploring {concept}. This story unfolds across \
         {scene_count} carefully crafted scenes, building tension and character development \
         while maintaining audience engagement throughout the journey."
    ))
}

/// The concept seed templates offered on the story-creation screen.
pub fn concept_templates() -> [&'static str; 4] {
    [
        "A space explorer discovers an ancient alien civilization",
        "A detective uncovers a conspiracy in a cyberpunk city",
        "A magical realm where time flows differently",
        "An underwater kingdom facing an environmental crisis",
    ]
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// The fixed character set produced by character generation.
///
/// Always exactly three characters; a re-run overwrites any previous
/// set including edited descriptions.
pub fn stock_characters() -> Vec<Character> {
    vec![
        Character {
            id: 1,
            name: "Alex Chen".to_string(),
            description: "A determined space explorer with cybernetic enhancements, wearing a \
                          sleek metallic suit. Short dark hair, piercing blue eyes, confident \
                          expression."
                .to_string(),
            role: "Protagonist".to_string(),
            voice_generated: true,
        },
        Character {
            id: 2,
            name: "Dr. Elena Vasquez".to_string(),
            description: "A brilliant scientist and researcher, mid-40s with silver-streaked \
                          brown hair, wearing a lab coat over futuristic attire. Wise and \
                          compassionate."
                .to_string(),
            role: "Mentor".to_string(),
            voice_generated: true,
        },
        Character {
            id: 3,
            name: "Commander Zor".to_string(),
            description: "An intimidating alien commander with scaled skin, towering height, \
                          and glowing red eyes. Wears ceremonial armor with ancient symbols."
                .to_string(),
            role: "Antagonist".to_string(),
            voice_generated: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

const SCENE_SCRIPT: &str = "A compelling scene showing the progression of the story. Characters \
                            face new challenges while the plot advances toward the climax. The \
                            scene includes dynamic action, emotional depth, and visual \
                            storytelling elements that work perfectly with Google Veo.";

/// Produce `count` scenes titled `Scene 1..Scene N` with identical
/// templated scripts, stock dialog lines, and empty image lists.
pub fn scene_batch(count: u32) -> Vec<Scene> {
    (1..=count as i64)
        .map(|i| Scene {
            id: i,
            title: format!("Scene {i}"),
            script: SCENE_SCRIPT.to_string(),
            transition_images: Vec::new(),
            dialogs: stock_dialogs(),
            is_expanded: false,
        })
        .collect()
}

/// The fixed four-image placeholder set for one scene.
pub fn transition_image_set() -> Vec<TransitionImage> {
    vec![
        TransitionImage {
            id: 1,
            kind: "opening".to_string(),
            description: "Scene opening shot".to_string(),
        },
        TransitionImage {
            id: 2,
            kind: "mid".to_string(),
            description: "Mid-scene action".to_string(),
        },
        TransitionImage {
            id: 3,
            kind: "climax".to_string(),
            description: "Scene climax moment".to_string(),
        },
        TransitionImage {
            id: 4,
            kind: "transition".to_string(),
            description: "Transition to next scene".to_string(),
        },
    ]
}

/// The fixed dialog lines attached to each generated scene.
///
/// The `Narrator` speaker intentionally has no matching character.
pub fn stock_dialogs() -> Vec<DialogLine> {
    vec![
        DialogLine {
            id: 1,
            speaker: "Narrator".to_string(),
            kind: "narration".to_string(),
            text: "The space station hummed with activity as Alex prepared for the mission."
                .to_string(),
            audio_generated: true,
        },
        DialogLine {
            id: 2,
            speaker: "Alex Chen".to_string(),
            kind: "dialog".to_string(),
            text: "Are you sure the coordinates are correct, Dr. Vasquez?".to_string(),
            audio_generated: true,
        },
        DialogLine {
            id: 3,
            speaker: "Dr. Elena Vasquez".to_string(),
            kind: "dialog".to_string(),
            text: "I've checked them three times. This is our only chance.".to_string(),
            audio_generated: true,
        },
        DialogLine {
            id: 4,
            speaker: "Commander Zor".to_string(),
            kind: "dialog".to_string(),
            text: "You humans are so naive. You walk into my trap willingly.".to_string(),
            audio_generated: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Portrait workshop
// ---------------------------------------------------------------------------

/// Produce the portrait prompt for the single-character workshop.
///
/// An empty name falls back to `"a character"`; the detail text is
/// appended as-is.
pub fn portrait_prompt(name: &str, details: &str) -> String {
    let subject = if name.trim().is_empty() { "a character" } else { name };
    format!(
        "A detailed portrait of {subject}, {details}. Professional studio lighting, high \
         quality, photorealistic, 8K resolution, detailed facial features, expressive eyes."
    )
}

/// Placeholder path returned by the portrait image workshop.
pub fn portrait_image_path() -> &'static str {
    "/api/placeholder/400/400"
}

/// The predefined prompts offered on the portrait workshop screen.
pub fn portrait_prompt_presets() -> [&'static str; 4] {
    [
        "A wise elderly wizard with flowing silver beard and mystical robes",
        "A brave young warrior with armor gleaming in sunlight",
        "A mysterious space explorer in futuristic suit",
        "A kind-hearted healer with gentle eyes and herb pouch",
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Scene count bounds --

    #[test]
    fn wizard_bounds_accept_min_and_max() {
        assert!(validate_wizard_scene_count(3).is_ok());
        assert!(validate_wizard_scene_count(12).is_ok());
    }

    #[test]
    fn wizard_bounds_reject_outside_range() {
        assert!(validate_wizard_scene_count(2).is_err());
        assert!(validate_wizard_scene_count(13).is_err());
        assert!(validate_wizard_scene_count(0).is_err());
    }

    #[test]
    fn workshop_bounds_extend_to_twenty() {
        assert!(validate_workshop_scene_count(20).is_ok());
        assert!(validate_workshop_scene_count(21).is_err());
    }

    #[test]
    fn default_scene_count_is_within_both_ranges() {
        assert!(validate_wizard_scene_count(DEFAULT_SCENE_COUNT).is_ok());
        assert!(validate_workshop_scene_count(DEFAULT_SCENE_COUNT).is_ok());
    }

    // -- Narrative enhancement --

    #[test]
    fn enhance_embeds_title_concept_and_count() {
        let narrative = enhance_narrative("Star Fall", "a dying sun", 7).unwrap();
        assert!(narrative.starts_with("Star Fall\n\n"));
        assert!(narrative.contains("a dying sun"));
        assert!(narrative.contains("across 7 carefully crafted scenes"));
    }

    #[test]
    fn enhance_rejects_empty_concept() {
        assert!(enhance_narrative("Title", "", 5).is_err());
    }

    #[test]
    fn enhance_rejects_whitespace_concept() {
        assert!(enhance_narrative("Title", "   \n\t", 5).is_err());
    }

    #[test]
    fn enhance_is_deterministic() {
        let a = enhance_narrative("T", "c", 5).unwrap();
        let b = enhance_narrative("T", "c", 5).unwrap();
        assert_eq!(a, b);
    }

    // -- Characters --

    #[test]
    fn stock_set_is_three_characters_with_fixed_roles() {
        let characters = stock_characters();
        assert_eq!(characters.len(), 3);
        let roles: Vec<&str> = characters.iter().map(|c| c.role.as_str()).collect();
        assert_eq!(roles, vec!["Protagonist", "Mentor", "Antagonist"]);
    }

    #[test]
    fn stock_character_ids_are_sequential() {
        let ids: Vec<i64> = stock_characters().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    // -- Scenes --

    #[test]
    fn batch_of_five_yields_numbered_titles_and_empty_images() {
        let scenes = scene_batch(5);
        assert_eq!(scenes.len(), 5);
        for (i, scene) in scenes.iter().enumerate() {
            assert_eq!(scene.title, format!("Scene {}", i + 1));
            assert!(scene.transition_images.is_empty());
        }
    }

    #[test]
    fn batch_scripts_are_identical() {
        let scenes = scene_batch(4);
        assert!(scenes.iter().all(|s| s.script == scenes[0].script));
    }

    #[test]
    fn image_set_has_four_entries_in_shot_order() {
        let images = transition_image_set();
        assert_eq!(images.len(), IMAGES_PER_SCENE);
        let kinds: Vec<&str> = images.iter().map(|i| i.kind.as_str()).collect();
        assert_eq!(kinds, vec!["opening", "mid", "climax", "transition"]);
    }

    #[test]
    fn narrator_line_has_no_matching_stock_character() {
        let dialogs = stock_dialogs();
        let characters = stock_characters();
        assert!(crate::project::find_speaker(&characters, &dialogs[0].speaker).is_none());
        assert!(crate::project::find_speaker(&characters, &dialogs[1].speaker).is_some());
    }

    // -- Portrait workshop --

    #[test]
    fn portrait_prompt_uses_fallback_subject_for_empty_name() {
        let prompt = portrait_prompt("", "weathered face");
        assert!(prompt.starts_with("A detailed portrait of a character, weathered face."));
    }

    #[test]
    fn portrait_prompt_embeds_name() {
        let prompt = portrait_prompt("Mira", "green cloak");
        assert!(prompt.contains("A detailed portrait of Mira, green cloak."));
    }
}
