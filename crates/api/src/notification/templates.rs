use lifereminder_domain::{ReminderType, Urgency};
use lifereminder_infra::EmailPayload;

/// One rendered line of a notification, regardless of channel
#[derive(Debug, Clone)]
pub struct TemplateItem {
    pub title: String,
    pub reminder_type: ReminderType,
    pub urgency: Urgency,
    pub notes: String,
}

fn display_name(user_name: &str) -> &str {
    if user_name.is_empty() {
        "there"
    } else {
        user_name
    }
}

pub fn build_reminder_email(user_name: &str, items: &[TemplateItem]) -> EmailPayload {
    let subject = match items {
        [single] => format!("Reminder: {} ({})", single.title, single.urgency),
        _ => format!("You have {} upcoming reminders", items.len()),
    };

    let rows = items
        .iter()
        .map(|item| {
            let notes = if item.notes.is_empty() {
                String::new()
            } else {
                format!(
                    r#"<br/><span style="color:#888;font-size:13px;">{}</span>"#,
                    item.notes
                )
            };
            let badge_color = if item.urgency == Urgency::Today {
                "#e74c3c"
            } else {
                "#f39c12"
            };
            format!(
                r#"
        <tr>
          <td style="padding:12px 16px;border-bottom:1px solid #f0f0f0;">
            <span style="font-size:20px;margin-right:8px;">{icon}</span>
            <strong>{title}</strong>
            {notes}
          </td>
          <td style="padding:12px 16px;border-bottom:1px solid #f0f0f0;text-align:right;">
            <span style="display:inline-block;padding:4px 12px;border-radius:12px;font-size:12px;font-weight:600;color:#fff;background:{badge_color};">{urgency}</span>
          </td>
        </tr>"#,
                icon = item.reminder_type.icon(),
                title = item.title,
                notes = notes,
                badge_color = badge_color,
                urgency = item.urgency,
            )
        })
        .collect::<String>();

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="margin:0;padding:0;background:#f4f6f8;font-family:'Segoe UI',Roboto,Helvetica,Arial,sans-serif;">
  <table width="100%" cellpadding="0" cellspacing="0" style="background:#f4f6f8;padding:32px 0;">
    <tr>
      <td align="center">
        <table width="560" cellpadding="0" cellspacing="0" style="background:#fff;border-radius:12px;box-shadow:0 2px 8px rgba(0,0,0,0.08);overflow:hidden;">
          <tr>
            <td style="background:linear-gradient(135deg,#667eea 0%,#764ba2 100%);padding:28px 32px;">
              <h1 style="margin:0;color:#fff;font-size:22px;font-weight:600;">🔔 Life Reminder</h1>
            </td>
          </tr>
          <tr>
            <td style="padding:28px 32px;">
              <p style="margin:0 0 20px;font-size:16px;color:#333;">
                Hi <strong>{name}</strong>, here are your upcoming reminders:
              </p>
              <table width="100%" cellpadding="0" cellspacing="0" style="border:1px solid #eee;border-radius:8px;overflow:hidden;">{rows}
              </table>
            </td>
          </tr>
          <tr>
            <td style="padding:20px 32px;background:#f9fafb;text-align:center;font-size:12px;color:#999;">
              You received this email because you have active reminders on Life Reminder.
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#,
        name = display_name(user_name),
        rows = rows,
    );

    EmailPayload { subject, html }
}

pub fn build_reminder_whatsapp(user_name: &str, items: &[TemplateItem]) -> String {
    let lines = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let notes = if item.notes.is_empty() {
                String::new()
            } else {
                format!("\n   _{}_", item.notes)
            };
            format!(
                "{}. {} *{}* — {}{}",
                i + 1,
                item.reminder_type.icon(),
                item.title,
                item.urgency,
                notes
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🔔 *Life Reminder*\n\nHi {}, here are your upcoming reminders:\n\n{}\n\n— _Life Reminder App_",
        display_name(user_name),
        lines
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn item(title: &str, urgency: Urgency) -> TemplateItem {
        TemplateItem {
            title: title.into(),
            reminder_type: ReminderType::Birthday,
            urgency,
            notes: String::new(),
        }
    }

    #[test]
    fn email_subject_names_a_single_reminder() {
        let payload = build_reminder_email("Asha", &[item("Mom's birthday", Urgency::Today)]);
        assert_eq!(payload.subject, "Reminder: Mom's birthday (Today)");
        assert!(payload.html.contains("Mom's birthday"));
        assert!(payload.html.contains("Hi <strong>Asha</strong>"));
    }

    #[test]
    fn email_subject_counts_multiple_reminders() {
        let payload = build_reminder_email(
            "Asha",
            &[
                item("Mom's birthday", Urgency::Today),
                item("Electricity bill", Urgency::Tomorrow),
            ],
        );
        assert_eq!(payload.subject, "You have 2 upcoming reminders");
    }

    #[test]
    fn missing_name_falls_back_to_a_generic_greeting() {
        let payload = build_reminder_email("", &[item("Rent", Urgency::Tomorrow)]);
        assert!(payload.html.contains("Hi <strong>there</strong>"));

        let message = build_reminder_whatsapp("", &[item("Rent", Urgency::Tomorrow)]);
        assert!(message.contains("Hi there"));
    }

    #[test]
    fn whatsapp_message_lists_items_with_notes() {
        let mut with_notes = item("Anniversary", Urgency::InDays(3));
        with_notes.notes = "Book a table".into();

        let message =
            build_reminder_whatsapp("Asha", &[item("Rent", Urgency::Today), with_notes]);
        assert!(message.contains("1. 🎂 *Rent* — Today"));
        assert!(message.contains("2. 🎂 *Anniversary* — In 3 days"));
        assert!(message.contains("_Book a table_"));
    }
}
