//! Cancellable mock-generation runs.
//!
//! Each trigger claims a [`GenerationTarget`], spawns a Tokio task that
//! sleeps the simulated latency, and only then applies the deterministic
//! result to the store. Runs carry a child [`CancellationToken`] of the
//! engine: a run cancelled mid-flight applies nothing and resets its
//! target to idle, so no state update can land after shutdown. Targets
//! are independent keys in a single state map; per-scene image runs for
//! different scenes proceed concurrently without touching each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use fabula_core::error::CoreError;
use fabula_core::generation as mock;
use fabula_core::project::{Character, Scene, TransitionImage};
use fabula_core::store::ProjectStore;
use fabula_core::types::{DbId, GenerationState};
use fabula_events::{self as events, EventBus, StudioEvent};

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// One addressable generation slot.
///
/// Conflict detection and status polling are keyed by this value, so
/// scene-image runs for different scenes never share a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationTarget {
    Narrative { project: DbId },
    Characters { project: DbId },
    Scenes { project: DbId },
    SceneImages { project: DbId, scene: DbId },
    PortraitPrompt,
    PortraitImage,
}

// ---------------------------------------------------------------------------
// Delays
// ---------------------------------------------------------------------------

/// Simulated latencies per target kind. Injected so tests can run at
/// zero delay or under paused time.
#[derive(Debug, Clone, Copy)]
pub struct GenerationDelays {
    pub narrative: Duration,
    pub characters: Duration,
    pub scenes: Duration,
    pub scene_images: Duration,
    pub portrait_prompt: Duration,
    pub portrait_image: Duration,
}

impl Default for GenerationDelays {
    fn default() -> Self {
        Self {
            narrative: Duration::from_millis(mock::ENHANCE_DELAY_MS),
            characters: Duration::from_millis(mock::CHARACTERS_DELAY_MS),
            scenes: Duration::from_millis(mock::SCENES_DELAY_MS),
            scene_images: Duration::from_millis(mock::SCENE_IMAGES_DELAY_MS),
            portrait_prompt: Duration::from_millis(mock::PORTRAIT_PROMPT_DELAY_MS),
            portrait_image: Duration::from_millis(mock::PORTRAIT_IMAGE_DELAY_MS),
        }
    }
}

impl GenerationDelays {
    /// All-zero latencies for tests.
    pub fn zero() -> Self {
        Self {
            narrative: Duration::ZERO,
            characters: Duration::ZERO,
            scenes: Duration::ZERO,
            scene_images: Duration::ZERO,
            portrait_prompt: Duration::ZERO,
            portrait_image: Duration::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Portrait workshop state
// ---------------------------------------------------------------------------

/// Output slots of the single-character portrait workshop.
#[derive(Debug, Clone, Default)]
pub struct PortraitWorkshop {
    pub prompt: Option<String>,
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Deterministic result computed at trigger time and applied when the
/// simulated latency elapses.
enum Output {
    Narrative(String),
    Characters(Vec<Character>),
    Scenes(Vec<Scene>),
    SceneImages(Vec<TransitionImage>),
    PortraitPrompt(String),
    PortraitImage(String),
}

/// Schedules mock-generation runs against the project store.
pub struct GenerationEngine {
    store: Arc<ProjectStore>,
    bus: Arc<EventBus>,
    delays: GenerationDelays,
    states: Arc<Mutex<HashMap<GenerationTarget, GenerationState>>>,
    workshop: Arc<RwLock<PortraitWorkshop>>,
    cancel: CancellationToken,
}

impl GenerationEngine {
    pub fn new(store: Arc<ProjectStore>, bus: Arc<EventBus>, delays: GenerationDelays) -> Self {
        Self {
            store,
            bus,
            delays,
            states: Arc::new(Mutex::new(HashMap::new())),
            workshop: Arc::new(RwLock::new(PortraitWorkshop::default())),
            cancel: CancellationToken::new(),
        }
    }

    /// Current state of one target.
    pub fn state(&self, target: GenerationTarget) -> GenerationState {
        self.states
            .lock()
            .expect("generation state lock poisoned")
            .get(&target)
            .copied()
            .unwrap_or_default()
    }

    /// Snapshot of the portrait workshop outputs.
    pub fn workshop(&self) -> PortraitWorkshop {
        self.workshop
            .read()
            .expect("portrait workshop lock poisoned")
            .clone()
    }

    /// Cancel every in-flight run. Cancelled runs apply nothing.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    // -- Triggers ----------------------------------------------------------

    /// Re-enhance the narrative of a committed project from its stored
    /// title/concept/scene count. Fails fast on an empty concept.
    pub fn start_narrative(&self, project: DbId) -> Result<(), CoreError> {
        let p = self
            .store
            .get(project)
            .ok_or(CoreError::NotFound { entity: "Project", id: project })?;
        let narrative = mock::enhance_narrative(&p.title, &p.concept, p.scene_count)?;
        let target = GenerationTarget::Narrative { project };
        self.claim(target)?;
        self.spawn(target, self.delays.narrative, Output::Narrative(narrative));
        Ok(())
    }

    /// Generate the fixed character set, overwriting any previous set
    /// when the run completes.
    pub fn start_characters(&self, project: DbId) -> Result<(), CoreError> {
        self.store
            .get(project)
            .ok_or(CoreError::NotFound { entity: "Project", id: project })?;
        let target = GenerationTarget::Characters { project };
        self.claim(target)?;
        self.spawn(target, self.delays.characters, Output::Characters(mock::stock_characters()));
        Ok(())
    }

    /// Generate scenes. `count_override` takes the workshop bounds
    /// (3-20); otherwise the project's own scene count applies, else 5.
    /// Returns the count the run will produce.
    pub fn start_scenes(&self, project: DbId, count_override: Option<u32>) -> Result<u32, CoreError> {
        let p = self
            .store
            .get(project)
            .ok_or(CoreError::NotFound { entity: "Project", id: project })?;
        let count = match count_override {
            Some(count) => {
                mock::validate_workshop_scene_count(count)?;
                count
            }
            None if p.scene_count > 0 => p.scene_count,
            None => mock::DEFAULT_SCENE_COUNT,
        };
        let target = GenerationTarget::Scenes { project };
        self.claim(target)?;
        self.spawn(target, self.delays.scenes, Output::Scenes(mock::scene_batch(count)));
        Ok(count)
    }

    /// Generate the four transition images for one scene. Other scenes'
    /// slots are unaffected.
    pub fn start_scene_images(&self, project: DbId, scene: DbId) -> Result<(), CoreError> {
        let p = self
            .store
            .get(project)
            .ok_or(CoreError::NotFound { entity: "Project", id: project })?;
        if p.scene(scene).is_none() {
            return Err(CoreError::NotFound { entity: "Scene", id: scene });
        }
        let target = GenerationTarget::SceneImages { project, scene };
        self.claim(target)?;
        self.spawn(
            target,
            self.delays.scene_images,
            Output::SceneImages(mock::transition_image_set()),
        );
        Ok(())
    }

    /// Produce a portrait prompt in the workshop.
    pub fn start_portrait_prompt(&self, name: &str, details: &str) -> Result<(), CoreError> {
        let target = GenerationTarget::PortraitPrompt;
        self.claim(target)?;
        self.spawn(
            target,
            self.delays.portrait_prompt,
            Output::PortraitPrompt(mock::portrait_prompt(name, details)),
        );
        Ok(())
    }

    /// Produce a portrait placeholder image in the workshop.
    pub fn start_portrait_image(&self) -> Result<(), CoreError> {
        let target = GenerationTarget::PortraitImage;
        self.claim(target)?;
        self.spawn(
            target,
            self.delays.portrait_image,
            Output::PortraitImage(mock::portrait_image_path().to_string()),
        );
        Ok(())
    }

    // -- Internals ---------------------------------------------------------

    /// Mark a target as generating, rejecting a double-start.
    fn claim(&self, target: GenerationTarget) -> Result<(), CoreError> {
        let mut states = self.states.lock().expect("generation state lock poisoned");
        let state = states.entry(target).or_default();
        if !state.can_start() {
            return Err(CoreError::Conflict(
                "A generation run is already in flight for this target".to_string(),
            ));
        }
        *state = GenerationState::Generating;
        Ok(())
    }

    fn spawn(&self, target: GenerationTarget, delay: Duration, output: Output) {
        let store = Arc::clone(&self.store);
        let bus = Arc::clone(&self.bus);
        let states = Arc::clone(&self.states);
        let workshop = Arc::clone(&self.workshop);
        let cancel = self.cancel.child_token();
        let run_id = uuid::Uuid::now_v7();
        tracing::debug!(%run_id, ?target, delay_ms = delay.as_millis() as u64, "Generation run scheduled");

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    set_state(&states, target, GenerationState::Idle);
                    tracing::debug!(%run_id, ?target, "Generation run cancelled before completion");
                }
                _ = tokio::time::sleep(delay) => {
                    match apply(&store, &workshop, target, output) {
                        Ok(event) => {
                            set_state(&states, target, GenerationState::Ready);
                            if let Some(event) = event {
                                bus.publish(event);
                            }
                        }
                        Err(err) => {
                            set_state(&states, target, GenerationState::Failed);
                            tracing::warn!(%run_id, ?target, error = %err, "Generation run failed");
                            bus.publish(
                                StudioEvent::new(events::GENERATION_FAILED)
                                    .with_payload(serde_json::json!({"error": err.to_string()})),
                            );
                        }
                    }
                }
            }
        });
    }
}

fn set_state(
    states: &Mutex<HashMap<GenerationTarget, GenerationState>>,
    target: GenerationTarget,
    state: GenerationState,
) {
    states
        .lock()
        .expect("generation state lock poisoned")
        .insert(target, state);
}

/// Write a completed run's output to its destination. Returns the event
/// to publish.
fn apply(
    store: &ProjectStore,
    workshop: &RwLock<PortraitWorkshop>,
    target: GenerationTarget,
    output: Output,
) -> Result<Option<StudioEvent>, CoreError> {
    match (target, output) {
        (GenerationTarget::Narrative { project }, Output::Narrative(narrative)) => {
            store.set_narrative(project, narrative)?;
            Ok(Some(
                StudioEvent::new(events::NARRATIVE_ENHANCED).with_source("project", project),
            ))
        }
        (GenerationTarget::Characters { project }, Output::Characters(characters)) => {
            let count = characters.len();
            store.replace_characters(project, characters)?;
            Ok(Some(
                StudioEvent::new(events::CHARACTERS_GENERATED)
                    .with_source("project", project)
                    .with_payload(serde_json::json!({"count": count})),
            ))
        }
        (GenerationTarget::Scenes { project }, Output::Scenes(scenes)) => {
            let count = scenes.len();
            store.replace_scenes(project, scenes)?;
            Ok(Some(
                StudioEvent::new(events::SCENES_GENERATED)
                    .with_source("project", project)
                    .with_payload(serde_json::json!({"count": count})),
            ))
        }
        (GenerationTarget::SceneImages { project, scene }, Output::SceneImages(images)) => {
            store.set_scene_images(project, scene, images)?;
            Ok(Some(
                StudioEvent::new(events::SCENE_IMAGES_GENERATED)
                    .with_source("scene", scene)
                    .with_payload(serde_json::json!({"project": project})),
            ))
        }
        (GenerationTarget::PortraitPrompt, Output::PortraitPrompt(prompt)) => {
            workshop
                .write()
                .expect("portrait workshop lock poisoned")
                .prompt = Some(prompt);
            Ok(None)
        }
        (GenerationTarget::PortraitImage, Output::PortraitImage(path)) => {
            workshop
                .write()
                .expect("portrait workshop lock poisoned")
                .image = Some(path);
            Ok(None)
        }
        // claim()/spawn() always pair a target with its own output kind.
        _ => Err(CoreError::Internal(
            "generation output did not match its target".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_core::NewProject;

    fn engine_with_project() -> (Arc<GenerationEngine>, DbId) {
        let store = Arc::new(ProjectStore::new());
        let project = store.create(NewProject {
            title: "Star Fall".to_string(),
            concept: "a dying sun".to_string(),
            genre: None,
            scene_count: 5,
            enhanced_narrative: Some("narrative".to_string()),
        });
        let bus = Arc::new(EventBus::default());
        let engine = Arc::new(GenerationEngine::new(
            Arc::clone(&store),
            bus,
            GenerationDelays::default(),
        ));
        (engine, project.id)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn narrative_run_applies_after_its_latency() {
        let (engine, project) = engine_with_project();
        engine.start_narrative(project).unwrap();
        assert_eq!(
            engine.state(GenerationTarget::Narrative { project }),
            GenerationState::Generating
        );

        advance(mock::ENHANCE_DELAY_MS + 1).await;

        assert_eq!(
            engine.state(GenerationTarget::Narrative { project }),
            GenerationState::Ready
        );
        let stored = engine.store.get(project).unwrap();
        assert!(stored.enhanced_narrative.unwrap().starts_with("Star Fall\n\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_is_a_conflict() {
        let (engine, project) = engine_with_project();
        engine.start_characters(project).unwrap();
        let err = engine.start_characters(project).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));

        // After completion the target can be started again.
        advance(mock::CHARACTERS_DELAY_MS + 1).await;
        assert!(engine.start_characters(project).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn regeneration_overwrites_the_character_set() {
        let (engine, project) = engine_with_project();
        engine.start_characters(project).unwrap();
        advance(mock::CHARACTERS_DELAY_MS + 1).await;

        engine
            .store
            .update_character_description(project, 1, "edited".to_string())
            .unwrap();

        engine.start_characters(project).unwrap();
        advance(mock::CHARACTERS_DELAY_MS + 1).await;

        let characters = engine.store.get(project).unwrap().characters;
        assert_eq!(characters.len(), 3);
        assert_ne!(characters[0].description, "edited");
    }

    #[tokio::test(start_paused = true)]
    async fn scene_image_runs_are_independent_per_scene() {
        let (engine, project) = engine_with_project();
        engine.start_scenes(project, None).unwrap();
        advance(mock::SCENES_DELAY_MS + 1).await;

        engine.start_scene_images(project, 1).unwrap();

        let scene_one = GenerationTarget::SceneImages { project, scene: 1 };
        let scene_two = GenerationTarget::SceneImages { project, scene: 2 };
        assert_eq!(engine.state(scene_one), GenerationState::Generating);
        assert_eq!(engine.state(scene_two), GenerationState::Idle);

        advance(mock::SCENE_IMAGES_DELAY_MS + 1).await;

        let scenes = engine.store.get(project).unwrap().scenes;
        assert_eq!(scenes[0].transition_images.len(), 4);
        assert!(scenes[1].transition_images.is_empty());
        assert_eq!(engine.state(scene_two), GenerationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn scenes_default_to_the_project_count() {
        let (engine, project) = engine_with_project();
        let count = engine.start_scenes(project, None).unwrap();
        assert_eq!(count, 5);
        advance(mock::SCENES_DELAY_MS + 1).await;

        let scenes = engine.store.get(project).unwrap().scenes;
        assert_eq!(scenes.len(), 5);
        assert_eq!(scenes[0].title, "Scene 1");
        assert_eq!(scenes[4].title, "Scene 5");
    }

    #[tokio::test(start_paused = true)]
    async fn scene_count_override_uses_workshop_bounds() {
        let (engine, project) = engine_with_project();
        assert!(engine.start_scenes(project, Some(21)).is_err());
        let count = engine.start_scenes(project, Some(20)).unwrap();
        assert_eq!(count, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_run_applies_nothing() {
        let (engine, project) = engine_with_project();
        engine.start_scenes(project, None).unwrap();
        engine.shutdown();

        advance(mock::SCENES_DELAY_MS + 1).await;

        assert!(engine.store.get(project).unwrap().scenes.is_empty());
        assert_eq!(
            engine.state(GenerationTarget::Scenes { project }),
            GenerationState::Idle
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_project_is_not_found() {
        let (engine, _) = engine_with_project();
        assert!(matches!(
            engine.start_characters(999).unwrap_err(),
            CoreError::NotFound { entity: "Project", .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn portrait_workshop_fills_its_slots() {
        let (engine, _) = engine_with_project();
        engine.start_portrait_prompt("Mira", "green cloak").unwrap();
        engine.start_portrait_image().unwrap();

        advance(mock::PORTRAIT_IMAGE_DELAY_MS + 1).await;

        let workshop = engine.workshop();
        assert!(workshop.prompt.unwrap().contains("Mira"));
        assert_eq!(workshop.image.as_deref(), Some("/api/placeholder/400/400"));
    }

    #[tokio::test(start_paused = true)]
    async fn completion_publishes_a_studio_event() {
        let store = Arc::new(ProjectStore::new());
        let project = store.create(NewProject {
            title: "T".to_string(),
            concept: "c".to_string(),
            genre: None,
            scene_count: 5,
            enhanced_narrative: None,
        });
        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let engine = GenerationEngine::new(Arc::clone(&store), bus, GenerationDelays::default());

        engine.start_scenes(project.id, None).unwrap();
        advance(mock::SCENES_DELAY_MS + 1).await;

        let event = rx.recv().await.expect("scene generation event");
        assert_eq!(event.event_type, events::SCENES_GENERATED);
        assert_eq!(event.payload["count"], 5);
    }
}
