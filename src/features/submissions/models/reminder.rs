use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::ids::IdGenerator;
use crate::shared::validation::{is_blank, looks_like_email, normalize_optional};

/// Scheduled notification fanned out to `notify_emails` at `reminder_date` + `reminder_time` (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(value_type = String, format = Date, example = "2026-11-02")]
    pub reminder_date: NaiveDate,
    #[serde(with = "crate::shared::serde_time")]
    #[schema(value_type = String, example = "09:30")]
    pub reminder_time: NaiveTime,
    pub notify_emails: Vec<String>,
    #[serde(default)]
    pub sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

impl Reminder {
    /// Instant the reminder fires
    pub fn at(&self) -> DateTime<Utc> {
        self.reminder_date.and_time(self.reminder_time).and_utc()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.sent && now >= self.at()
    }
}

/// Reminder being composed, before it has an id
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::shared::serde_time::date_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub reminder_date: Option<NaiveDate>,
    #[serde(default, with = "crate::shared::serde_time::option")]
    #[schema(value_type = Option<String>, example = "09:30")]
    pub reminder_time: Option<NaiveTime>,
    #[serde(default)]
    pub notify_emails: Vec<String>,
}

impl ReminderDraft {
    /// Ignored when blank or without `@`. Duplicates are kept.
    pub fn add_recipient(&mut self, email: &str) {
        if !looks_like_email(email) {
            return;
        }
        self.notify_emails.push(email.trim().to_string());
    }

    pub fn remove_recipient(&mut self, email: &str) {
        let email = email.trim();
        self.notify_emails.retain(|e| e != email);
    }
}

pub fn add(
    reminders: &[Reminder],
    draft: ReminderDraft,
    ids: &dyn IdGenerator,
) -> Result<Vec<Reminder>> {
    if is_blank(&draft.title) {
        return Err(AppError::Validation("Reminder title is required".to_string()));
    }
    let (Some(reminder_date), Some(reminder_time)) = (draft.reminder_date, draft.reminder_time)
    else {
        return Err(AppError::Validation(
            "Reminder date and time are required".to_string(),
        ));
    };
    if draft.notify_emails.is_empty() {
        return Err(AppError::Validation(
            "At least one recipient email is required".to_string(),
        ));
    }
    if let Some(bad) = draft.notify_emails.iter().find(|e| !looks_like_email(e)) {
        return Err(AppError::Validation(format!(
            "Invalid recipient email '{}'",
            bad
        )));
    }

    let mut next = reminders.to_vec();
    next.push(Reminder {
        id: ids.next_id(),
        title: draft.title.trim().to_string(),
        description: normalize_optional(draft.description),
        reminder_date,
        reminder_time,
        notify_emails: draft.notify_emails,
        sent: false,
        sent_at: None,
    });
    Ok(next)
}

pub fn remove(reminders: &[Reminder], id: Uuid) -> Vec<Reminder> {
    reminders.iter().filter(|r| r.id != id).cloned().collect()
}

/// Flag `id` as dispatched. A reminder that was already sent keeps its original `sent_at`.
pub fn mark_sent(
    reminders: &[Reminder],
    id: Uuid,
    sent_at: DateTime<Utc>,
) -> Result<Vec<Reminder>> {
    if !reminders.iter().any(|r| r.id == id) {
        return Err(AppError::NotFound(format!("Reminder {} not found", id)));
    }

    Ok(reminders
        .iter()
        .cloned()
        .map(|mut r| {
            if r.id == id && !r.sent {
                r.sent = true;
                r.sent_at = Some(sent_at);
            }
            r
        })
        .collect())
}

pub fn due(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<&Reminder> {
    reminders.iter().filter(|r| r.is_due(now)).collect()
}

/// Earliest instant among reminders not yet sent
pub fn next_due_at(reminders: &[Reminder]) -> Option<DateTime<Utc>> {
    reminders.iter().filter(|r| !r.sent).map(Reminder::at).min()
}

/// Take dispatch state from `stored` for every reminder of an editor snapshot.
///
/// Only the dispatcher marks reminders sent, so a stale snapshot cannot
/// resend one and a new reminder always starts unsent.
pub fn carry_sent(stored: &[Reminder], incoming: Vec<Reminder>) -> Vec<Reminder> {
    incoming
        .into_iter()
        .map(|mut reminder| {
            match stored.iter().find(|s| s.id == reminder.id) {
                Some(previous) => {
                    reminder.sent = previous.sent;
                    reminder.sent_at = previous.sent_at;
                }
                None => {
                    reminder.sent = false;
                    reminder.sent_at = None;
                }
            }
            reminder
        })
        .collect()
}

pub fn validate_snapshot(reminders: &[Reminder]) -> Result<()> {
    let mut seen = HashSet::new();
    for reminder in reminders {
        if !seen.insert(reminder.id) {
            return Err(AppError::Validation(format!(
                "Duplicate reminder id {}",
                reminder.id
            )));
        }
        if is_blank(&reminder.title) {
            return Err(AppError::Validation("Reminder title is required".to_string()));
        }
        if reminder.notify_emails.is_empty() {
            return Err(AppError::Validation(format!(
                "Reminder {} has no recipients",
                reminder.id
            )));
        }
        if reminder.sent != reminder.sent_at.is_some() {
            return Err(AppError::Validation(format!(
                "Reminder {} has inconsistent sent data",
                reminder.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ids::SequentialIds;
    use chrono::TimeZone;

    fn draft(title: &str) -> ReminderDraft {
        let mut draft = ReminderDraft {
            title: title.to_string(),
            description: Some("  bring gloves ".to_string()),
            reminder_date: NaiveDate::from_ymd_opt(2026, 11, 2),
            reminder_time: NaiveTime::from_hms_opt(9, 30, 0),
            notify_emails: vec![],
        };
        draft.add_recipient("crew@example.org");
        draft
    }

    #[test]
    fn test_add_recipient_ignores_invalid_and_keeps_duplicates() {
        let mut d = ReminderDraft::default();
        d.add_recipient("");
        d.add_recipient("not-an-email");
        d.add_recipient("a@x.org");
        d.add_recipient("a@x.org");
        assert_eq!(d.notify_emails, vec!["a@x.org", "a@x.org"]);

        d.remove_recipient("a@x.org");
        assert!(d.notify_emails.is_empty());
    }

    #[test]
    fn test_add_appends_unsent_reminder() {
        let ids = SequentialIds::default();
        let reminders = add(&[], draft("Cleanup kickoff"), &ids).unwrap();

        assert_eq!(reminders.len(), 1);
        let r = &reminders[0];
        assert_eq!(r.id, SequentialIds::id(1));
        assert_eq!(r.description.as_deref(), Some("bring gloves"));
        assert!(!r.sent);
        assert!(r.sent_at.is_none());
        assert_eq!(r.at(), Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_add_rejects_incomplete_drafts() {
        let ids = SequentialIds::default();

        let blank_title = draft("  ");
        assert!(matches!(
            add(&[], blank_title, &ids),
            Err(AppError::Validation(_))
        ));

        let mut no_time = draft("Kickoff");
        no_time.reminder_time = None;
        assert!(matches!(add(&[], no_time, &ids), Err(AppError::Validation(_))));

        let mut no_recipients = draft("Kickoff");
        no_recipients.notify_emails.clear();
        assert!(matches!(
            add(&[], no_recipients, &ids),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let ids = SequentialIds::default();
        let reminders = add(&[], draft("One"), &ids).unwrap();
        let reminders = add(&reminders, draft("Two"), &ids).unwrap();

        let once = remove(&reminders, SequentialIds::id(1));
        assert_eq!(once.len(), 1);
        assert_eq!(remove(&once, SequentialIds::id(1)), once);
    }

    #[test]
    fn test_due_and_mark_sent() {
        let ids = SequentialIds::default();
        let reminders = add(&[], draft("Kickoff"), &ids).unwrap();
        let id = reminders[0].id;

        let before = Utc.with_ymd_and_hms(2026, 11, 2, 9, 29, 59).unwrap();
        let exactly = Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap();
        assert!(!reminders[0].is_due(before));
        assert!(reminders[0].is_due(exactly));
        assert_eq!(due(&reminders, exactly).len(), 1);

        let sent = mark_sent(&reminders, id, exactly).unwrap();
        assert!(sent[0].sent);
        assert_eq!(sent[0].sent_at, Some(exactly));
        assert!(!sent[0].is_due(exactly));
        assert!(validate_snapshot(&sent).is_ok());

        let later = Utc.with_ymd_and_hms(2026, 11, 3, 0, 0, 0).unwrap();
        let again = mark_sent(&sent, id, later).unwrap();
        assert_eq!(again, sent);
    }

    #[test]
    fn test_carry_sent_ignores_editor_dispatch_state() {
        let ids = SequentialIds::default();
        let reminders = add(&[], draft("Kickoff"), &ids).unwrap();
        let reminders = add(&reminders, draft("Wrap-up"), &ids).unwrap();
        let sent_at = Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap();
        let stored = mark_sent(&reminders, reminders[0].id, sent_at).unwrap();

        // Snapshot taken before dispatch, plus a reminder claiming to be sent
        let mut stale = reminders.clone();
        stale[1].sent = true;
        stale[1].sent_at = Some(sent_at);

        let carried = carry_sent(&stored, stale);
        assert!(carried[0].sent);
        assert_eq!(carried[0].sent_at, Some(sent_at));
        assert!(!carried[1].sent);
        assert_eq!(carried[1].sent_at, None);
    }

    #[test]
    fn test_next_due_at_skips_sent() {
        let ids = SequentialIds::default();
        assert_eq!(next_due_at(&[]), None);

        let mut later = draft("Wrap-up");
        later.reminder_date = NaiveDate::from_ymd_opt(2026, 12, 1);
        let reminders = add(&[], later, &ids).unwrap();
        let reminders = add(&reminders, draft("Kickoff"), &ids).unwrap();

        let kickoff = Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap();
        assert_eq!(next_due_at(&reminders), Some(kickoff));

        let sent = mark_sent(&reminders, reminders[1].id, kickoff).unwrap();
        assert_eq!(
            next_due_at(&sent),
            Some(Utc.with_ymd_and_hms(2026, 12, 1, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_mark_sent_unknown_id_is_not_found() {
        let ids = SequentialIds::default();
        let reminders = add(&[], draft("Kickoff"), &ids).unwrap();

        let err = mark_sent(&reminders, Uuid::nil(), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_reminder_wire_format() {
        let ids = SequentialIds::default();
        let reminders = add(&[], draft("Kickoff"), &ids).unwrap();
        let value = serde_json::to_value(&reminders[0]).unwrap();

        assert_eq!(value["reminderDate"], "2026-11-02");
        assert_eq!(value["reminderTime"], "09:30");
        assert_eq!(value["notifyEmails"][0], "crew@example.org");
        assert_eq!(value["sent"], false);
    }
}
