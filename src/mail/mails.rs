use crate::models::contact::ContactDto;

use super::sendmail::{render_template, Notifier};

const CONTACT_ACK_TEMPLATE: &str = include_str!("../../templates/mail/contact-ack.txt");
const CONTACT_OWNER_TEMPLATE: &str = include_str!("../../templates/mail/contact-owner.txt");

/// Outcome of the two contact notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactDelivery {
    pub submitter: bool,
    pub owner: bool,
}

pub async fn send_contact_ack_email(notifier: &dyn Notifier, contact: &ContactDto) -> bool {
    let subject = "Thank you for your message";
    let placeholders = [
        ("name", contact.name.as_str()),
        ("message", contact.message.as_str()),
    ];

    let body = render_template(CONTACT_ACK_TEMPLATE, &placeholders);
    notifier.send(&contact.email, subject, &body).await
}

pub async fn send_contact_owner_email(
    notifier: &dyn Notifier,
    owner: &str,
    contact: &ContactDto,
) -> bool {
    let subject = format!("Contact form: {}", contact.name);
    let placeholders = [
        ("name", contact.name.as_str()),
        ("email", contact.email.as_str()),
        ("message", contact.message.as_str()),
    ];

    let body = render_template(CONTACT_OWNER_TEMPLATE, &placeholders);
    notifier.send(owner, &subject, &body).await
}

/// Sends the acknowledgement and the owner notification, one after the other.
pub async fn send_contact_emails(
    notifier: &dyn Notifier,
    owner: &str,
    contact: &ContactDto,
) -> ContactDelivery {
    let submitter = send_contact_ack_email(notifier, contact).await;
    let owner = send_contact_owner_email(notifier, owner, contact).await;

    ContactDelivery { submitter, owner }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            true
        }
    }

    #[tokio::test]
    async fn contact_sends_to_submitter_then_owner() {
        let notifier = RecordingNotifier::default();
        let contact = ContactDto {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            message: "hi".to_string(),
        };

        let delivery = send_contact_emails(&notifier, "owner@blog.test", &contact).await;
        assert_eq!(delivery, ContactDelivery { submitter: true, owner: true });

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "a@x.com");
        assert!(sent[0].2.contains("Hello A"));
        assert_eq!(sent[1].0, "owner@blog.test");
        assert_eq!(sent[1].1, "Contact form: A");
        assert!(sent[1].2.contains("a@x.com"));
        assert!(sent[1].2.contains("hi"));
    }
}
