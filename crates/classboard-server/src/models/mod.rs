//! Course dashboard domain models

use chrono::{DateTime, Utc};
use classboard_common::types::PlaylistId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// A video imported from the provider playlist.
///
/// Created once on import or sync and afterwards only touched by the
/// material-editing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    /// Provider-side video identifier
    pub item_id: String,
    pub support_material: Option<String>,
    pub in_class_exercises: Option<String>,
    pub out_of_class_exercises: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Video data as discovered on the provider, before it is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub item_id: String,
}

impl NewVideo {
    pub fn new(title: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            item_id: item_id.into(),
        }
    }

    pub fn into_video(self) -> Video {
        Video {
            id: Uuid::new_v4(),
            title: self.title,
            item_id: self.item_id,
            support_material: None,
            in_class_exercises: None,
            out_of_class_exercises: None,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of the editable video fields. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMaterials {
    pub support_material: Option<String>,
    pub in_class_exercises: Option<String>,
    pub out_of_class_exercises: Option<String>,
}

impl VideoMaterials {
    pub fn is_empty(&self) -> bool {
        self.support_material.is_none()
            && self.in_class_exercises.is_none()
            && self.out_of_class_exercises.is_none()
    }

    /// Apply onto a video. An empty string clears the field.
    pub fn apply(&self, video: &mut Video) {
        fn merge(target: &mut Option<String>, value: &Option<String>) {
            if let Some(value) = value {
                *target = if value.is_empty() { None } else { Some(value.clone()) };
            }
        }
        merge(&mut video.support_material, &self.support_material);
        merge(&mut video.in_class_exercises, &self.in_class_exercises);
        merge(&mut video.out_of_class_exercises, &self.out_of_class_exercises);
    }
}

/// A single piece of class material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSection {
    #[serde(default)]
    pub essential: Vec<Material>,
    #[serde(default)]
    pub complementary: Vec<Material>,
}

impl MaterialSection {
    fn materials(&self) -> impl Iterator<Item = &Material> {
        self.essential.iter().chain(self.complementary.iter())
    }
}

/// One instructor-defined class of the course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Always equal to the class position in [`Dashboard::classes`]
    #[serde(default)]
    pub class_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Index into [`Dashboard::videos`] of the video bound to this class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_index: Option<u32>,
    #[serde(default)]
    pub pre_class_material: MaterialSection,
    #[serde(default)]
    pub in_class_material: MaterialSection,
    #[serde(default)]
    pub post_class_material: MaterialSection,
}

impl ClassRecord {
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.pre_class_material
            .materials()
            .chain(self.in_class_material.materials())
            .chain(self.post_class_material.materials())
    }
}

/// Aggregate for one imported course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: Uuid,
    pub title: String,
    /// Stored as imported; validated again before every provider call
    pub playlist_id: String,
    pub number_of_classes: i32,
    /// Prefix-stable: synchronization only ever appends
    pub videos: Vec<Video>,
    pub classes: Vec<ClassRecord>,
    pub environment_url: Option<String>,
    pub forum_url: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Out-of-range class position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Class {index} not found (dashboard has {len} classes)")]
pub struct ClassIndexError {
    pub index: usize,
    pub len: usize,
}

impl Dashboard {
    /// Replace the class at `class_num`, or append it when `class_num`
    /// equals the current class count.
    pub fn set_class(&mut self, class_num: usize, mut class: ClassRecord) -> Result<(), ClassIndexError> {
        let len = self.classes.len();
        class.class_number = class_num as u32;
        match class_num.cmp(&len) {
            std::cmp::Ordering::Less => self.classes[class_num] = class,
            std::cmp::Ordering::Equal => self.classes.push(class),
            std::cmp::Ordering::Greater => {
                return Err(ClassIndexError {
                    index: class_num,
                    len,
                })
            },
        }
        self.number_of_classes = self.classes.len() as i32;
        Ok(())
    }

    /// Remove the class at `class_num` and renumber the remainder
    pub fn remove_class(&mut self, class_num: usize) -> Result<ClassRecord, ClassIndexError> {
        if class_num >= self.classes.len() {
            return Err(ClassIndexError {
                index: class_num,
                len: self.classes.len(),
            });
        }
        let removed = self.classes.remove(class_num);
        for (i, class) in self.classes.iter_mut().enumerate().skip(class_num) {
            class.class_number = i as u32;
        }
        self.number_of_classes = self.classes.len() as i32;
        Ok(removed)
    }

    pub fn class(&self, class_num: usize) -> Option<&ClassRecord> {
        self.classes.get(class_num)
    }

    /// Whether any class material lives outside the course environment host.
    ///
    /// With no environment URL every linked material counts as external.
    /// Material URLs that cannot be parsed are treated as external.
    pub fn has_external_material(&self) -> bool {
        let environment_host = self
            .environment_url
            .as_deref()
            .and_then(|u| url::Url::parse(u).ok())
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase));

        self.classes
            .iter()
            .flat_map(|class| class.materials())
            .filter_map(|m| m.url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .any(|material_url| {
                let material_host = url::Url::parse(material_url)
                    .ok()
                    .and_then(|u| u.host_str().map(str::to_ascii_lowercase));
                match (&environment_host, material_host) {
                    (Some(env), Some(host)) => *env != host,
                    _ => true,
                }
            })
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            id: self.id,
            title: self.title.clone(),
            playlist_id: self.playlist_id.clone(),
            number_of_classes: self.number_of_classes,
            video_count: self.videos.len() as i64,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Dashboard listing entry without the embedded videos and classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DashboardSummary {
    pub id: Uuid,
    pub title: String,
    pub playlist_id: String,
    pub number_of_classes: i32,
    pub video_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a dashboard on import
#[derive(Debug, Clone)]
pub struct NewDashboard {
    pub title: String,
    pub playlist_id: PlaylistId,
    pub author_id: Uuid,
}

/// Partial update of the editable dashboard fields. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardDetails {
    pub title: Option<String>,
    pub environment_url: Option<String>,
    pub forum_url: Option<String>,
}

impl DashboardDetails {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.environment_url.is_none() && self.forum_url.is_none()
    }

    /// Apply onto a dashboard. An empty URL clears the field.
    pub fn apply(&self, dashboard: &mut Dashboard) {
        if let Some(title) = &self.title {
            dashboard.title = title.clone();
        }
        if let Some(url) = &self.environment_url {
            dashboard.environment_url = (!url.is_empty()).then(|| url.clone());
        }
        if let Some(url) = &self.forum_url {
            dashboard.forum_url = (!url.is_empty()).then(|| url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard_with_classes(n: usize) -> Dashboard {
        let mut dashboard = Dashboard {
            id: Uuid::new_v4(),
            title: "Course".to_string(),
            playlist_id: "PLtest".to_string(),
            number_of_classes: 0,
            videos: vec![],
            classes: vec![],
            environment_url: None,
            forum_url: None,
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        for i in 0..n {
            let class = ClassRecord {
                title: Some(format!("Class {}", i)),
                ..Default::default()
            };
            dashboard.set_class(i, class).unwrap();
        }
        dashboard
    }

    fn material(url: &str) -> Material {
        Material {
            title: "Reading".to_string(),
            url: Some(url.to_string()),
            description: None,
        }
    }

    #[test]
    fn test_remove_class_renumbers() {
        let mut dashboard = dashboard_with_classes(4);
        let removed = dashboard.remove_class(1).unwrap();
        assert_eq!(removed.title.as_deref(), Some("Class 1"));

        let numbers: Vec<u32> = dashboard.classes.iter().map(|c| c.class_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        let titles: Vec<_> = dashboard.classes.iter().map(|c| c.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["Class 0", "Class 2", "Class 3"]);
        assert_eq!(dashboard.number_of_classes, 3);
    }

    #[test]
    fn test_remove_class_out_of_range() {
        let mut dashboard = dashboard_with_classes(2);
        let err = dashboard.remove_class(2).unwrap_err();
        assert_eq!(err, ClassIndexError { index: 2, len: 2 });
        assert_eq!(dashboard.classes.len(), 2);
    }

    #[test]
    fn test_set_class_replace_append_and_gap() {
        let mut dashboard = dashboard_with_classes(2);

        let replacement = ClassRecord {
            class_number: 99,
            title: Some("Replaced".to_string()),
            ..Default::default()
        };
        dashboard.set_class(0, replacement).unwrap();
        assert_eq!(dashboard.classes[0].title.as_deref(), Some("Replaced"));
        assert_eq!(dashboard.classes[0].class_number, 0);

        dashboard.set_class(2, ClassRecord::default()).unwrap();
        assert_eq!(dashboard.classes.len(), 3);
        assert_eq!(dashboard.classes[2].class_number, 2);
        assert_eq!(dashboard.number_of_classes, 3);

        assert!(dashboard.set_class(5, ClassRecord::default()).is_err());
        assert_eq!(dashboard.classes.len(), 3);
    }

    #[test]
    fn test_external_material_without_environment() {
        let mut dashboard = dashboard_with_classes(1);
        assert!(!dashboard.has_external_material());

        dashboard.classes[0]
            .pre_class_material
            .essential
            .push(material("https://moodle.example.edu/mod/page/1"));
        assert!(dashboard.has_external_material());
    }

    #[test]
    fn test_external_material_against_environment_host() {
        let mut dashboard = dashboard_with_classes(1);
        dashboard.environment_url = Some("https://Moodle.example.edu/course/view.php?id=4".to_string());
        dashboard.classes[0]
            .in_class_material
            .complementary
            .push(material("https://moodle.example.edu/mod/page/1"));
        assert!(!dashboard.has_external_material());

        dashboard.classes[0]
            .post_class_material
            .essential
            .push(material("https://docs.rs/axum"));
        assert!(dashboard.has_external_material());
    }

    #[test]
    fn test_materials_without_url_are_not_external() {
        let mut dashboard = dashboard_with_classes(1);
        dashboard.classes[0].pre_class_material.essential.push(Material {
            title: "Read chapter 2".to_string(),
            url: None,
            description: Some("Textbook".to_string()),
        });
        assert!(!dashboard.has_external_material());
    }

    #[test]
    fn test_video_materials_apply_only_given_fields() {
        let mut video = NewVideo::new("Intro", "abc123").into_video();
        video.in_class_exercises = Some("Exercise list 1".to_string());

        let update = VideoMaterials {
            support_material: Some("Slides".to_string()),
            ..Default::default()
        };
        update.apply(&mut video);

        assert_eq!(video.support_material.as_deref(), Some("Slides"));
        assert_eq!(video.in_class_exercises.as_deref(), Some("Exercise list 1"));
        assert_eq!(video.title, "Intro");
        assert_eq!(video.item_id, "abc123");
    }

    #[test]
    fn test_dashboard_details_empty_url_clears() {
        let mut dashboard = dashboard_with_classes(0);
        dashboard.forum_url = Some("https://forum.example.edu".to_string());

        let update = DashboardDetails {
            forum_url: Some(String::new()),
            ..Default::default()
        };
        update.apply(&mut dashboard);
        assert!(dashboard.forum_url.is_none());
        assert_eq!(dashboard.title, "Course");
    }

    #[test]
    fn test_class_record_deserializes_with_missing_sections() {
        let class: ClassRecord = serde_json::from_str(r#"{"title":"Week 1"}"#).unwrap();
        assert_eq!(class.title.as_deref(), Some("Week 1"));
        assert!(class.pre_class_material.essential.is_empty());
        assert_eq!(class.video_index, None);
    }
}
