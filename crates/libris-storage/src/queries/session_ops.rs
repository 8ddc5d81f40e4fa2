//! Session persistence. Timestamps are stored as RFC 3339 UTC with second
//! precision so that string comparison orders them correctly.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use libris_core::errors::LibrisResult;
use libris_core::models::SessionRecord;

use crate::{sqlite_err, to_storage_err};

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Load a live session. Expired sessions are deleted and reported as absent.
pub fn load_session(
    conn: &Connection,
    session_id: &str,
    now: DateTime<Utc>,
) -> LibrisResult<Option<SessionRecord>> {
    let row = conn
        .prepare_cached(
            "SELECT session_id, user_id, username, csrf_token, flashes, expires_at
             FROM sessions WHERE session_id = ?1",
        )
        .map_err(sqlite_err)?
        .query_row(params![session_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .optional()
        .map_err(sqlite_err)?;

    let Some((session_id, user_id, username, csrf_token, flashes, expires_at)) = row else {
        return Ok(None);
    };

    let expires_at = DateTime::parse_from_rfc3339(&expires_at)
        .map_err(|e| to_storage_err(format!("bad session expiry {expires_at:?}: {e}")))?
        .with_timezone(&Utc);
    let flashes: Vec<String> = serde_json::from_str(&flashes)
        .map_err(|e| to_storage_err(format!("bad session flashes: {e}")))?;

    let record = SessionRecord {
        session_id,
        user_id,
        username,
        csrf_token,
        flashes,
        expires_at,
    };
    if record.is_expired(now) {
        delete_session(conn, &record.session_id)?;
        return Ok(None);
    }
    Ok(Some(record))
}

pub fn save_session(conn: &Connection, session: &SessionRecord) -> LibrisResult<()> {
    let flashes =
        serde_json::to_string(&session.flashes).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO sessions (session_id, user_id, username, csrf_token, flashes, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(session_id) DO UPDATE SET
             user_id = excluded.user_id,
             username = excluded.username,
             csrf_token = excluded.csrf_token,
             flashes = excluded.flashes,
             expires_at = excluded.expires_at",
        params![
            session.session_id,
            session.user_id,
            session.username,
            session.csrf_token,
            flashes,
            format_ts(session.expires_at),
        ],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn delete_session(conn: &Connection, session_id: &str) -> LibrisResult<()> {
    conn.execute("DELETE FROM sessions WHERE session_id = ?1", params![session_id])
        .map_err(sqlite_err)?;
    Ok(())
}

/// Remove every session that expired at or before `now`.
pub fn purge_expired(conn: &Connection, now: DateTime<Utc>) -> LibrisResult<usize> {
    conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        params![format_ts(now)],
    )
    .map_err(sqlite_err)
}
