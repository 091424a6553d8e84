use crate::config::ViewerConfig;
use crate::error::StoryDataError;
use serde::Deserialize;
use std::collections::HashSet;

/// Manifest compiled into the bundle.
pub const BUNDLED_MANIFEST: &str = include_str!("../assets/stories.json");

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Substory {
    pub id: u32,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Story {
    pub id: u32,
    pub substories: Vec<Substory>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct StoryManifest {
    #[serde(default)]
    pub viewer: ViewerConfig,
    pub stories: Vec<Story>,
}

impl StoryManifest {
    pub fn from_json(json: &str) -> Result<Self, StoryDataError> {
        let manifest: StoryManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        log::debug!("loaded {} stories", manifest.stories.len());
        Ok(manifest)
    }

    pub fn bundled() -> Result<Self, StoryDataError> {
        Self::from_json(BUNDLED_MANIFEST)
    }

    fn validate(&self) -> Result<(), StoryDataError> {
        if self.stories.is_empty() {
            return Err(StoryDataError::Empty);
        }

        let mut story_ids = HashSet::new();
        for story in &self.stories {
            if !story_ids.insert(story.id) {
                return Err(StoryDataError::DuplicateStory { story_id: story.id });
            }
            if story.substories.is_empty() {
                return Err(StoryDataError::NoSubstories { story_id: story.id });
            }

            let mut substory_ids = HashSet::new();
            for substory in &story.substories {
                if !substory_ids.insert(substory.id) {
                    return Err(StoryDataError::DuplicateSubstory {
                        story_id: story.id,
                        substory_id: substory.id,
                    });
                }
                if substory.video_url.trim().is_empty() {
                    return Err(StoryDataError::EmptyVideoUrl {
                        story_id: story.id,
                        substory_id: substory.id,
                    });
                }
            }
        }
        Ok(())
    }

}
