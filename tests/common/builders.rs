//! Test data builders for screenplay construction.
//!
//! Provides fluent API for creating test screenplays with sensible defaults.

use shotlist::models::{
    CharacterProfile, ElementType, HeroArtifact, Screenplay, ScreenplayElement, ScreenplayScene,
};

/// Builder for a whole screenplay.
pub struct ScreenplayBuilder {
    title: String,
    scenes: Vec<ScreenplayScene>,
}

impl ScreenplayBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scenes: Vec::new(),
        }
    }

    /// Append a scene. Scene numbers are assigned in order.
    pub fn scene(mut self, scene: SceneBuilder) -> Self {
        let number = self.scenes.len() as u32 + 1;
        self.scenes.push(scene.build(number));
        self
    }

    pub fn build(self) -> Screenplay {
        Screenplay {
            title: self.title,
            scenes: self.scenes,
        }
    }
}

/// Builder for one scene.
pub struct SceneBuilder {
    slugline: String,
    beat: String,
    polarity: String,
    characters: Vec<String>,
    duration: f64,
    elements: Vec<ScreenplayElement>,
}

impl SceneBuilder {
    pub fn new(slugline: impl Into<String>) -> Self {
        Self {
            slugline: slugline.into(),
            beat: "Setup".to_string(),
            polarity: String::new(),
            characters: Vec::new(),
            duration: 0.0,
            elements: Vec::new(),
        }
    }

    pub fn beat(mut self, beat: impl Into<String>) -> Self {
        self.beat = beat.into();
        self
    }

    pub fn polarity(mut self, polarity: impl Into<String>) -> Self {
        self.polarity = polarity.into();
        self
    }

    pub fn character(mut self, name: impl Into<String>) -> Self {
        self.characters.push(name.into());
        self
    }

    /// Declared scene length in seconds.
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn action(mut self, text: impl Into<String>) -> Self {
        self.elements
            .push(ScreenplayElement::new(ElementType::Action, text));
        self
    }

    /// Character cue followed by its dialogue line.
    pub fn line(mut self, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        self.elements
            .push(ScreenplayElement::new(ElementType::Character, speaker));
        self.elements
            .push(ScreenplayElement::new(ElementType::Dialogue, text));
        self
    }

    /// Dialogue with no preceding character cue.
    pub fn orphan_line(mut self, text: impl Into<String>) -> Self {
        self.elements
            .push(ScreenplayElement::new(ElementType::Dialogue, text));
        self
    }

    /// Element of a kind the planner does not film (parenthetical, transition).
    pub fn element(mut self, kind: &str, text: impl Into<String>) -> Self {
        self.elements
            .push(ScreenplayElement::new(ElementType::Other(kind.to_string()), text));
        self
    }

    pub fn build(self, scene_number: u32) -> ScreenplayScene {
        ScreenplayScene {
            scene_number,
            slugline: self.slugline,
            beat: self.beat,
            emotional_polarity: self.polarity,
            characters_present: self.characters,
            estimated_duration_seconds: self.duration,
            elements: self.elements,
            ..Default::default()
        }
    }
}

/// Hero artifact with a named hero and antagonist.
pub fn hero_artifact() -> HeroArtifact {
    HeroArtifact {
        hero: Some(CharacterProfile {
            name: "Mara Voss".to_string(),
            adjective_descriptor: "wiry courier with a shaved head".to_string(),
        }),
        antagonist: Some(CharacterProfile {
            name: "Silas Crane".to_string(),
            adjective_descriptor: "silver-haired broker in a grey suit".to_string(),
        }),
    }
}

/// A three-scene screenplay that exercises most rules.
///
/// Dialogue closes each scene so no L-cuts appear inside scenes; the three
/// scene exits are the only non-cut transitions among 13 shots.
pub fn heist_screenplay() -> Screenplay {
    ScreenplayBuilder::new("The Vault Job")
        .scene(
            SceneBuilder::new("EXT. HARBOR STREET - NIGHT")
                .beat("Setup")
                .polarity("+")
                .character("MARA")
                .duration(20.0)
                .action("Rain sheets across the docks.\n\nMARA, 32, steps out of a cab.")
                .action("She slowly climbs the fire escape.")
                .line("MARA", "Nobody follows me in."),
        )
        .scene(
            SceneBuilder::new("INT. VAULT - NIGHT")
                .beat("Midpoint")
                .polarity("-")
                .character("MARA")
                .character("SILAS")
                .duration(30.0)
                .action("The vault door explodes inward.")
                .action("Mara realizes Silas planned this from the start.")
                .line("SILAS", "You were never alone in here.")
                .line("MARA", "Then who opened the door?"),
        )
        .scene(
            SceneBuilder::new("EXT. ROOFTOP - DAWN")
                .beat("Finale")
                .polarity("+")
                .character("MARA")
                .duration(15.0)
                .action("Mara tears the ledger in half.")
                .line("MARA", "It's over."),
        )
        .build()
}
