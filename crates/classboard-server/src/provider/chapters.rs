//! Chapter markers embedded in video descriptions
//!
//! A chapter line starts with a `[h:]mm:ss` timestamp followed by a title,
//! e.g. `00:00 Intro` or `1:02:30 - Wrap up`. The list only counts when it
//! starts at 0:00, has at least [`MIN_CHAPTERS`] entries and is strictly
//! increasing; otherwise the video is reported as having no chapters.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fewest markers the video host accepts as a chapter list
pub const MIN_CHAPTERS: usize = 3;

const CHAPTER_LINE: &str = r"^\s*(?:(\d{1,2}):)?(\d{1,2}):(\d{2})\s*(?:[-–—|:]\s*)?(\S.*?)\s*$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub start_seconds: u32,
    pub title: String,
}

impl Chapter {
    /// `m:ss` or `h:mm:ss`
    pub fn timestamp(&self) -> String {
        let hours = self.start_seconds / 3600;
        let minutes = (self.start_seconds % 3600) / 60;
        let seconds = self.start_seconds % 60;
        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }
}

pub fn parse_chapters(description: &str) -> Result<Vec<Chapter>, regex::Error> {
    let line_pattern = Regex::new(CHAPTER_LINE)?;

    let mut chapters: Vec<Chapter> = Vec::new();
    for line in description.lines() {
        let Some(caps) = line_pattern.captures(line) else {
            continue;
        };

        let hours: u32 = caps.get(1).map_or(Ok(0), |m| m.as_str().parse()).unwrap_or(0);
        let minutes: u32 = caps[2].parse().unwrap_or(0);
        let seconds: u32 = caps[3].parse().unwrap_or(0);
        if seconds >= 60 || (caps.get(1).is_some() && minutes >= 60) {
            continue;
        }

        chapters.push(Chapter {
            start_seconds: hours * 3600 + minutes * 60 + seconds,
            title: caps[4].to_string(),
        });
    }

    let starts_at_zero = chapters.first().is_some_and(|c| c.start_seconds == 0);
    let increasing = chapters
        .windows(2)
        .all(|pair| pair[0].start_seconds < pair[1].start_seconds);

    if chapters.len() < MIN_CHAPTERS || !starts_at_zero || !increasing {
        return Ok(Vec::new());
    }
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_description() {
        let description = "Lecture 3 on consensus.\n\
                           \n\
                           0:00 Introduction\n\
                           04:15 - Paxos recap\n\
                           1:02:30 | Raft\n\
                           Slides: https://example.edu/slides.pdf";
        let chapters = parse_chapters(description).unwrap();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0], Chapter {
            start_seconds: 0,
            title: "Introduction".to_string(),
        });
        assert_eq!(chapters[1].start_seconds, 255);
        assert_eq!(chapters[1].title, "Paxos recap");
        assert_eq!(chapters[2].start_seconds, 3750);
        assert_eq!(chapters[2].title, "Raft");
    }

    #[test]
    fn test_requires_start_at_zero() {
        let description = "0:10 Intro\n1:00 Middle\n2:00 End";
        assert!(parse_chapters(description).unwrap().is_empty());
    }

    #[test]
    fn test_requires_three_markers() {
        let description = "0:00 Intro\n1:00 End";
        assert!(parse_chapters(description).unwrap().is_empty());
    }

    #[test]
    fn test_requires_increasing_times() {
        let description = "0:00 Intro\n2:00 Later\n1:00 Earlier";
        assert!(parse_chapters(description).unwrap().is_empty());
    }

    #[test]
    fn test_ignores_malformed_timestamps() {
        let description = "0:00 Intro\n1:75 Not a time\n2:00 Body\n3:00 End";
        let chapters = parse_chapters(description).unwrap();
        let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Intro", "Body", "End"]);
    }

    #[test]
    fn test_no_chapters_in_plain_description() {
        assert!(parse_chapters("Just a description.").unwrap().is_empty());
        assert!(parse_chapters("").unwrap().is_empty());
    }

    #[test]
    fn test_timestamp_formatting() {
        let short = Chapter {
            start_seconds: 255,
            title: String::new(),
        };
        let long = Chapter {
            start_seconds: 3750,
            title: String::new(),
        };
        assert_eq!(short.timestamp(), "4:15");
        assert_eq!(long.timestamp(), "1:02:30");
    }
}
