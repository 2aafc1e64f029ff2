//! Composition of the two emails this service sends: the administrator's
//! upload notification and the guest's document reminder.

use chrono::{DateTime, Datelike, Utc};
use html_escape::encode_text;

use crate::config::SiteConfig;
use crate::model::booking::Booking;
use crate::model::document::{format_file_size, UploadedDocument};
use crate::model::traveler::Traveler;
use crate::util::email::{EmailAttachment, EmailMessage};

/// Everything the administrator needs to know about one upload
pub struct UploadNotification<'a> {
    pub booking_id: &'a str,
    pub guest_name: &'a str,
    pub guest_email: Option<&'a str>,
    pub travelers: &'a [Traveler],
    pub documents: &'a [UploadedDocument],
}

#[derive(Debug, Clone)]
pub struct NotificationComposer {
    site: SiteConfig,
    admin_email: String,
}

impl NotificationComposer {
    pub fn new(site: SiteConfig, admin_email: String) -> Self {
        Self { site, admin_email }
    }

    /// Admin notification with every uploaded file attached
    pub fn upload_notification(&self, upload: &UploadNotification<'_>) -> EmailMessage {
        let site_name = encode_text(&self.site.site_name);
        let guest_email = upload
            .guest_email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or("Not provided");

        let travelers_html: String = upload
            .travelers
            .iter()
            .map(|t| {
                format!(
                    r#"<li style="margin-bottom: 5px;">{} ({}: {})</li>"#,
                    encode_text(&t.name),
                    encode_text(t.document_type.display_name()),
                    encode_text(&t.document_number)
                )
            })
            .collect();

        let files_html: String = upload
            .documents
            .iter()
            .map(|d| {
                format!(
                    r#"
      <tr>
        <td style="padding: 8px; border: 1px solid #ddd;">{}</td>
        <td style="padding: 8px; border: 1px solid #ddd;">{}</td>
        <td style="padding: 8px; border: 1px solid #ddd;">{}</td>
        <td style="padding: 8px; border: 1px solid #ddd;">{}</td>
        <td style="padding: 8px; border: 1px solid #ddd;">{}</td>
        <td style="padding: 8px; border: 1px solid #ddd;">{}</td>
      </tr>"#,
                    encode_text(&d.traveler_name),
                    encode_text(d.document_type.display_name()),
                    encode_text(&d.document_number),
                    encode_text(&d.original_name),
                    d.media_type.as_mime(),
                    format_file_size(d.size)
                )
            })
            .collect();

        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #1e40af; color: white; padding: 20px; text-align: center;">
    <h1 style="margin: 0;">{site_name} - Document Upload Notification</h1>
  </div>
  <div style="padding: 20px; border: 1px solid #e5e7eb; border-top: none;">
    <h2>New Documents Uploaded</h2>
    <h3>Booking Information</h3>
    <p><strong>Booking ID:</strong> {booking_id}</p>
    <p><strong>Lead Guest Name:</strong> {guest_name}</p>
    <p><strong>Contact Email:</strong> {guest_email}</p>
    <h3>Travelers</h3>
    <ul style="padding-left: 20px;">{travelers_html}</ul>
    <h3>Documents</h3>
    <table style="width: 100%; border-collapse: collapse; margin-top: 10px;">
      <thead>
        <tr>
          <th style="padding: 8px; text-align: left; border: 1px solid #ddd; background-color: #f2f2f2;">Traveler Name</th>
          <th style="padding: 8px; text-align: left; border: 1px solid #ddd; background-color: #f2f2f2;">Document Type</th>
          <th style="padding: 8px; text-align: left; border: 1px solid #ddd; background-color: #f2f2f2;">Document Number</th>
          <th style="padding: 8px; text-align: left; border: 1px solid #ddd; background-color: #f2f2f2;">Filename</th>
          <th style="padding: 8px; text-align: left; border: 1px solid #ddd; background-color: #f2f2f2;">Type</th>
          <th style="padding: 8px; text-align: left; border: 1px solid #ddd; background-color: #f2f2f2;">Size</th>
        </tr>
      </thead>
      <tbody>{files_html}</tbody>
    </table>
    <p style="margin-top: 20px;">The uploaded documents are attached to this email and were also forwarded to the booking system.</p>
    <p>This is an automated notification. Please do not reply to this email.</p>
  </div>
  {footer}
</div>"#,
            site_name = site_name,
            booking_id = encode_text(upload.booking_id),
            guest_name = encode_text(upload.guest_name),
            guest_email = encode_text(guest_email),
            travelers_html = travelers_html,
            files_html = files_html,
            footer = self.footer_html(),
        );

        let mut message = EmailMessage::new(
            self.admin_email.clone(),
            format!(
                "[{}] Travel Documents Uploaded - Booking {}",
                self.site.site_name, upload.booking_id
            ),
        )
        .with_html_body(html);

        for doc in upload.documents {
            message = message.with_attachment(EmailAttachment {
                filename: doc.attachment_name(),
                content: doc.content.clone(),
                content_type: doc.media_type.as_mime().to_string(),
            });
        }
        message
    }

    /// Reminder asking a guest to upload travel documents before arrival
    pub fn document_reminder(&self, booking: &Booking) -> EmailMessage {
        let guest_name = if booking.guest_name.trim().is_empty() {
            "Guest"
        } else {
            booking.guest_name.trim()
        };
        let check_in = booking
            .check_in_at()
            .map(format_stay_date)
            .unwrap_or_else(|| booking.check_in_date.clone());
        let stay = match booking.check_out_at() {
            Some(out) => format!("{} to {}", check_in, format_stay_date(out)),
            None => check_in.clone(),
        };
        let upload_url = &self.site.upload_page_url;

        let text = format!(
            r#"Dear {guest_name},

We are looking forward to welcoming you at {site} ({stay}).

To complete your check-in, please upload an identity document for every traveler in your party before arrival:

{upload_url}

Your booking number is {booking_id}.

Thank you,
{site}

---
This is an automated message. Please do not reply to this email."#,
            guest_name = guest_name,
            site = self.site.site_name,
            stay = stay,
            upload_url = upload_url,
            booking_id = booking.booking_id,
        );

        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #1e40af; color: white; padding: 20px; text-align: center;">
    <h1 style="margin: 0;">{site}</h1>
  </div>
  <div style="padding: 20px; border: 1px solid #e5e7eb; border-top: none;">
    <p>Dear {guest_name},</p>
    <p>We are looking forward to welcoming you ({stay}).</p>
    <p>To complete your check-in, please upload an identity document for every traveler in your party before arrival.</p>
    <div style="text-align: center;">
      <a href="{upload_url}" style="display: inline-block; padding: 12px 24px; background-color: #1e40af; color: #ffffff; text-decoration: none; border-radius: 4px; font-weight: bold; margin: 20px 0;">Upload documents</a>
    </div>
    <p>Your booking number is <strong>{booking_id}</strong>.</p>
    <p>Thank you,<br>{site}</p>
  </div>
  {footer}
</div>"#,
            site = encode_text(&self.site.site_name),
            guest_name = encode_text(guest_name),
            stay = encode_text(&stay),
            upload_url = html_escape::encode_double_quoted_attribute(upload_url),
            booking_id = encode_text(&booking.booking_id),
            footer = self.footer_html(),
        );

        EmailMessage::new(
            booking.guest_email.clone(),
            format!("[{}] Please upload your travel documents", self.site.site_name),
        )
        .with_text_body(text)
        .with_html_body(html)
    }

    fn footer_html(&self) -> String {
        format!(
            r#"<div style="background-color: #f3f4f6; padding: 15px; text-align: center; font-size: 12px; color: #6b7280;">
    <p>&copy; {year} {site}. All rights reserved.</p>
    <p><a href="{url}" style="color: #6b7280; text-decoration: underline;">{url_text}</a></p>
  </div>"#,
            year = Utc::now().year(),
            site = encode_text(&self.site.site_name),
            url = html_escape::encode_double_quoted_attribute(&self.site.site_url),
            url_text = encode_text(self.site.site_url.trim_start_matches("https://")),
        )
    }
}

fn format_stay_date(date: DateTime<Utc>) -> String {
    date.format("%A, %-d %B %Y").to_string()
}
