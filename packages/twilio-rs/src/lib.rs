// https://www.twilio.com/docs/messaging/api/message-resource#create-a-message-resource

use std::collections::HashMap;
use std::time::Duration;

pub mod models;
use reqwest::{header, Client};

use crate::models::{MessageResponse, TwilioErrorBody};

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number in E.164 format (e.g. "+15005550006")
    pub from_number: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    client: Client,
    base_url: String,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self::with_base_url(options, API_BASE)
    }

    /// Point the client at a different API host (used for local fakes).
    pub fn with_base_url(options: TwilioOptions, base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            options,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{base}/Accounts/{sid}/Messages.json",
            base = self.base_url,
            sid = self.options.account_sid
        )
    }

    /// Send a single SMS to `recipient` (E.164) with the given body.
    pub async fn send_sms(
        &self,
        recipient: &str,
        body: &str,
    ) -> Result<MessageResponse, &'static str> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let form_body = message_form(recipient, &self.options.from_number, body);

        let res = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .headers(headers)
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    match serde_json::from_str::<TwilioErrorBody>(&error_body) {
                        Ok(err) => eprintln!(
                            "Twilio error ({}): code={:?} message={}",
                            status, err.code, err.message
                        ),
                        Err(_) => eprintln!("Twilio error ({}): {}", status, error_body),
                    }
                    return Err("Twilio returned an error");
                }

                match response.json::<MessageResponse>().await {
                    Ok(message) if message.is_failed() => {
                        eprintln!("Twilio rejected message {}: {}", message.sid, message.status);
                        Err("Message was rejected by Twilio")
                    }
                    Ok(message) => Ok(message),
                    Err(e) => {
                        eprintln!("Failed to parse Twilio response: {}", e);
                        Err("Error parsing message response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Twilio failed: {}", e);
                Err("Error sending SMS")
            }
        }
    }
}

/// Form fields for the Messages resource.
pub fn message_form<'a>(to: &'a str, from: &'a str, body: &'a str) -> HashMap<&'static str, &'a str> {
    let mut form_body = HashMap::new();
    form_body.insert("To", to);
    form_body.insert("From", from);
    form_body.insert("Body", body);
    form_body
}
