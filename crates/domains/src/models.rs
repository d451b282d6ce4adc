//! # Domain Models
//!
//! These structs represent the core entities of Guarda Memória.
//! All of them are externally authored records read through the ports,
//! except [`Visit`], which is the only thing this layer ever writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Brazilian state. `sigla` is the two-letter abbreviation (e.g. "MG").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: i32,
    pub name: String,
    pub sigla: String,
}

/// A city as listed in catalog endpoints.
///
/// The slug is a URL-safe alternate lookup key, unique within a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub state_id: i32,
}

/// A city joined with the sigla of its state, the projection used by the
/// single-city fetch and the full catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityWithState {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub state_id: i32,
    pub state_sigla: String,
}

/// A media post belonging to a city and a pessoa.
///
/// `parent_id`, when set, marks this media as a reply to another media;
/// display always resolves a reply chain to its root post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: i32,
    pub permalink: String,
    pub city_id: i32,
    pub pessoa_id: i32,
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// The projection returned by a permalink lookup: just enough to build the
/// redirect to the owning city's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermalinkTarget {
    pub media_id: i32,
    pub city_id: i32,
    pub parent_id: Option<i32>,
    pub city_slug: String,
}

impl PermalinkTarget {
    /// The media id the browser should scroll to: replies point at their
    /// root post, with the reply itself carried as the sub-reference.
    pub fn display_id(&self) -> i32 {
        self.parent_id.unwrap_or(self.media_id)
    }
}

/// A biographical entry, joined with its user's full name and its city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pessoa {
    pub id: i32,
    pub full_name: String,
    pub city_name: String,
    pub state_sigla: String,
}

/// One page-visit event. Append-only; never read back by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub path: String,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The fields a caller supplies when recording a visit. Everything but the
/// path is optional and stored as absent when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVisit {
    pub path: String,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_id_prefers_parent() {
        let reply = PermalinkTarget {
            media_id: 7,
            city_id: 1,
            parent_id: Some(3),
            city_slug: "ouro-preto".into(),
        };
        assert_eq!(reply.display_id(), 3);

        let root = PermalinkTarget { parent_id: None, ..reply };
        assert_eq!(root.display_id(), 7);
    }

    #[test]
    fn city_round_trips_through_serde() {
        let city = City {
            id: 12,
            name: "Mariana".into(),
            slug: "mariana".into(),
            state_id: 1,
        };
        let json = serde_json::to_string(&city).unwrap();
        let back: City = serde_json::from_str(&json).unwrap();
        assert_eq!(back, city);
    }
}
