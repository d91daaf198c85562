use crate::timeline::ease::Ease;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One step of the narration script, produced by the narration-generation
/// collaborator. Read-only input to this crate.
pub struct NarrationStep {
    /// 1-based step number as authored.
    pub step_number: u32,
    /// Caption text, passed through to the timeline untouched.
    pub narrative: String,
    /// Text to align against document elements.
    pub highlight_text: String,
    /// Spoken duration in seconds, reported by the speech collaborator.
    pub duration_secs: f64,
    /// Per-step zoom override; derived from the highlight box when absent.
    #[serde(default)]
    pub zoom: Option<f64>,
    /// Per-step easing override.
    #[serde(default)]
    pub ease: Option<Ease>,
}
