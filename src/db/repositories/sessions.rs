use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{parse_datetime, parse_location, parse_miss, parse_rating, parse_tags, tags_to_json},
    Database,
};
use crate::models::{NewSession, SessionPatch, SessionRecord};

const SESSION_COLUMNS: &str = "id, session_date, location_type, clubs_focus, main_goal, big_miss, \
     face_control_rating, contact_rating, confidence_rating, notes, tags, created_at, updated_at";

fn row_to_session(row: &Row) -> Result<SessionRecord> {
    let location_type: Option<String> = row.get("location_type")?;
    let big_miss: Option<String> = row.get("big_miss")?;
    let face: Option<i64> = row.get("face_control_rating")?;
    let contact: Option<i64> = row.get("contact_rating")?;
    let confidence: Option<i64> = row.get("confidence_rating")?;
    let tags: String = row.get("tags")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(SessionRecord {
        id: row.get("id")?,
        session_date: row.get("session_date")?,
        location_type: parse_location(location_type),
        clubs_focus: row.get("clubs_focus")?,
        main_goal: row.get("main_goal")?,
        big_miss: parse_miss(big_miss),
        face_control_rating: parse_rating(face, "face_control_rating"),
        contact_rating: parse_rating(contact, "contact_rating"),
        confidence_rating: parse_rating(confidence, "confidence_rating"),
        notes: row.get("notes")?,
        tags: parse_tags(&tags),
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    /// Insert a new session. The store assigns the id and timestamps.
    pub async fn insert_session(&self, input: NewSession) -> Result<SessionRecord> {
        input.validate()?;
        self.execute(move |conn| {
            let id = Uuid::new_v4().to_string();
            let now = Utc::now();

            conn.execute(
                "INSERT INTO sessions (id, session_date, location_type, clubs_focus, main_goal, big_miss, \
                 face_control_rating, contact_rating, confidence_rating, notes, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    id,
                    input.session_date,
                    input.location_type.map(|l| l.as_str()),
                    input.clubs_focus,
                    input.main_goal,
                    input.big_miss.map(|m| m.as_str()),
                    input.face_control_rating,
                    input.contact_rating,
                    input.confidence_rating,
                    input.notes,
                    tags_to_json(&input.tags)?,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )?;

            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"
            ))?;
            let mut rows = stmt.query(params![id])?;
            match rows.next()? {
                Some(row) => row_to_session(row),
                None => Err(anyhow!("session not found after insert")),
            }
        })
        .await
    }

    /// All sessions, newest first. This is the display order.
    pub async fn list_sessions(&self) -> Result<Vec<SessionRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 ORDER BY session_date DESC, created_at DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }

            Ok(sessions)
        })
        .await
    }

    /// All sessions oldest first, date ties in insertion order. This is the
    /// order the stats engine expects its snapshot in.
    pub async fn list_sessions_chronological(&self) -> Result<Vec<SessionRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 ORDER BY session_date ASC, created_at ASC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }

            Ok(sessions)
        })
        .await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionRecord> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"
            ))?;
            let mut rows = stmt.query(params![session_id])?;
            match rows.next()? {
                Some(row) => row_to_session(row),
                None => Err(anyhow!("session not found")),
            }
        })
        .await
    }

    /// Apply a partial update to a session and return the updated record.
    pub async fn update_session(
        &self,
        session_id: &str,
        patch: SessionPatch,
    ) -> Result<SessionRecord> {
        patch.validate()?;
        if patch.is_empty() {
            return Err(anyhow!("no fields to update"));
        }

        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let now = Utc::now();

            let mut updates = Vec::new();
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(date) = patch.session_date.clone() {
                updates.push("session_date = ?");
                params_vec.push(Box::new(date));
            }
            if let Some(location) = patch.location_type {
                updates.push("location_type = ?");
                params_vec.push(Box::new(location.map(|l| l.as_str())));
            }
            if let Some(clubs) = patch.clubs_focus.clone() {
                updates.push("clubs_focus = ?");
                params_vec.push(Box::new(clubs));
            }
            if let Some(goal) = patch.main_goal.clone() {
                updates.push("main_goal = ?");
                params_vec.push(Box::new(goal));
            }
            if let Some(miss) = patch.big_miss {
                updates.push("big_miss = ?");
                params_vec.push(Box::new(miss.map(|m| m.as_str())));
            }
            if let Some(face) = patch.face_control_rating {
                updates.push("face_control_rating = ?");
                params_vec.push(Box::new(face));
            }
            if let Some(contact) = patch.contact_rating {
                updates.push("contact_rating = ?");
                params_vec.push(Box::new(contact));
            }
            if let Some(confidence) = patch.confidence_rating {
                updates.push("confidence_rating = ?");
                params_vec.push(Box::new(confidence));
            }
            if let Some(notes) = patch.notes.clone() {
                updates.push("notes = ?");
                params_vec.push(Box::new(notes));
            }
            if let Some(tags) = patch.tags.clone() {
                updates.push("tags = ?");
                params_vec.push(Box::new(tags_to_json(&tags)?));
            }

            updates.push("updated_at = ?");
            params_vec.push(Box::new(now.to_rfc3339()));

            let query = format!("UPDATE sessions SET {} WHERE id = ?", updates.join(", "));
            params_vec.push(Box::new(session_id.clone()));

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();

            let rows_affected = conn.execute(&query, params_refs.as_slice())?;
            if rows_affected == 0 {
                return Err(anyhow!("session not found"));
            }

            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"
            ))?;
            let mut rows = stmt.query(params![session_id])?;
            match rows.next()? {
                Some(row) => row_to_session(row),
                None => Err(anyhow!("session not found after update")),
            }
        })
        .await
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM sessions WHERE id = ?1", params![session_id])?;
            if rows_affected == 0 {
                return Err(anyhow!("session not found"));
            }
            Ok(())
        })
        .await
    }
}
