use chrono::{NaiveDate, Utc};
use log::info;
use uuid::Uuid;

use crate::models::{AlbumProject, AlbumSettings, Page, Spread, SpreadType};

impl AlbumProject {
    /// New project holding only the cover spread (a single right-hand page)
    pub fn new(
        name: &str,
        client_name: &str,
        event_date: Option<NaiveDate>,
        settings: AlbumSettings,
    ) -> Self {
        let now = Utc::now();
        let cover = Spread {
            id: Uuid::new_v4(),
            spread_number: 0,
            left: None,
            right: Some(Page::new(1)),
            spread_type: SpreadType::Cover,
        };

        info!("Created album project '{}' for {}", name, client_name);

        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            client_name: client_name.to_string(),
            event_date,
            created_at: now,
            modified_at: now,
            settings,
            spreads: vec![cover],
        }
    }

    pub fn append_spreads(&mut self, spreads: Vec<Spread>) {
        self.spreads.extend(spreads);
        self.touch();
    }

    pub fn move_spread_up(&mut self, id: Uuid) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.spreads.swap(index, index - 1);
                self.touch();
                true
            }
            _ => false,
        }
    }

    pub fn move_spread_down(&mut self, id: Uuid) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.spreads.len() => {
                self.spreads.swap(index, index + 1);
                self.touch();
                true
            }
            _ => false,
        }
    }

    pub fn remove_spread(&mut self, id: Uuid) -> Option<Spread> {
        let index = self.position(id)?;
        let removed = self.spreads.remove(index);
        self.touch();
        Some(removed)
    }

    /// Zones holding a photo, across every spread
    pub fn placed_photo_count(&self) -> usize {
        self.spreads
            .iter()
            .flat_map(|spread| spread.pages())
            .map(|page| page.filled_count())
            .sum()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.spreads.iter().position(|spread| spread.id == id)
    }

    fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_spreads(count: u32) -> AlbumProject {
        let settings = AlbumSettings::default();
        let mut project = AlbumProject::new("Smith Wedding", "J. Smith", None, settings);
        project.append_spreads((1..=count).map(Spread::regular).collect());
        project
    }

    fn numbers(project: &AlbumProject) -> Vec<u32> {
        project.spreads.iter().map(|spread| spread.spread_number).collect()
    }

    #[test]
    fn test_new_project_has_cover() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 20);
        let settings = AlbumSettings::default();
        let project = AlbumProject::new("Smith Wedding", "J. Smith", date, settings);

        assert_eq!(project.spreads.len(), 1);
        let cover = &project.spreads[0];
        assert_eq!(cover.spread_type, SpreadType::Cover);
        assert_eq!(cover.spread_number, 0);
        assert!(cover.left.is_none());
        assert_eq!(cover.right.as_ref().unwrap().page_number, 1);
        assert_eq!(project.event_date, date);
    }

    #[test]
    fn test_move_spreads() {
        let mut project = project_with_spreads(2);
        let second = project.spreads[2].id;

        assert!(project.move_spread_up(second));
        assert_eq!(numbers(&project), vec![0, 2, 1]);
        assert!(project.move_spread_up(second));
        assert!(!project.move_spread_up(second));
        assert_eq!(numbers(&project), vec![2, 0, 1]);

        assert!(project.move_spread_down(second));
        assert_eq!(numbers(&project), vec![0, 2, 1]);
        assert!(!project.move_spread_down(Uuid::new_v4()));
    }

    #[test]
    fn test_remove_spread() {
        let mut project = project_with_spreads(2);
        let first = project.spreads[1].id;
        let before = project.modified_at;

        let removed = project.remove_spread(first).unwrap();
        assert_eq!(removed.spread_number, 1);
        assert_eq!(numbers(&project), vec![0, 2]);
        assert!(project.modified_at >= before);
        assert!(project.remove_spread(first).is_none());
    }

    #[test]
    fn test_project_round_trips_through_json() {
        let project = project_with_spreads(1);
        let json = serde_json::to_string(&project).unwrap();
        let back: AlbumProject = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, project.id);
        assert_eq!(back.spreads, project.spreads);
        assert_eq!(back.placed_photo_count(), 0);
    }
}
