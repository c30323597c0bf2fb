use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

pub const CATEGORIES: [&str; 6] = [
    "Streaming",
    "Productivity",
    "Cloud Storage",
    "News",
    "Utilities",
    "Other",
];

pub const PAYMENT_STATUSES: [&str; 3] = ["pending", "paid", "overdue"];

/// A money amount as the backend sends it: usually a number, sometimes the
/// string the form submitted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Number(f64),
    Text(String),
}

impl WireAmount {
    fn value(&self) -> Option<f64> {
        match self {
            WireAmount::Number(n) => Some(*n),
            WireAmount::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    // Some payloads carry a full timestamp; the date part is what matters.
    let day = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(day, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("ignoring unparseable {} {:?}", field, raw);
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Subscription as it appears on the wire. Every field except `id` is
/// optional because the create, edit and list endpoints do not agree on the
/// shape.
#[derive(Clone, Debug, Deserialize)]
pub struct SubscriptionRecord {
    id: i64,
    service_name: Option<String>,
    cost: Option<WireAmount>,
    category: Option<String>,
    payment_status: Option<String>,
    renewal_date: Option<String>,
    current_period_start: Option<String>,
    current_period_end: Option<String>,
    current_instance_id: Option<i64>,
    canceled: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BillingPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subscription {
    pub id: i64,
    pub service_name: String,
    pub cost: f64,
    pub category: Option<String>,
    pub payment_status: Option<String>,
    pub period: BillingPeriod,
    pub current_instance_id: Option<i64>,
    pub canceled: bool,
}

impl From<SubscriptionRecord> for Subscription {
    fn from(record: SubscriptionRecord) -> Self {
        let end = record
            .current_period_end
            .as_deref()
            .or(record.renewal_date.as_deref());

        Subscription {
            id: record.id,
            service_name: record.service_name.unwrap_or_default(),
            cost: record.cost.as_ref().and_then(WireAmount::value).unwrap_or(0.0),
            category: non_blank(record.category),
            payment_status: non_blank(record.payment_status),
            period: BillingPeriod {
                start: parse_date("current_period_start", record.current_period_start.as_deref()),
                end: parse_date("current_period_end", end),
            },
            current_instance_id: record.current_instance_id,
            canceled: record.canceled.unwrap_or(false),
        }
    }
}

impl Subscription {
    /// Fills fields the edit endpoint leaves out of its response from the
    /// record it replaces.
    pub fn inherit_missing(mut self, previous: &Subscription) -> Self {
        if self.period.start.is_none() {
            self.period.start = previous.period.start;
        }
        if self.period.end.is_none() {
            self.period.end = previous.period.end;
        }
        if self.current_instance_id.is_none() {
            self.current_instance_id = previous.current_instance_id;
        }
        if self.payment_status.is_none() {
            self.payment_status = previous.payment_status.clone();
        }
        self
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Reminder as it appears on the wire.
#[derive(Clone, Debug, Deserialize)]
pub struct ReminderRecord {
    reminder_id: Option<i64>,
    id: Option<i64>,
    subscription_id: Option<i64>,
    service_name: Option<String>,
    current_period_end: Option<String>,
    renewal_date: Option<String>,
    send_date: Option<String>,
    sent: Option<bool>,
    category: Option<String>,
    cost: Option<WireAmount>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reminder {
    /// List key; `reminder_id`, then `id`, then the subscription id.
    pub key: String,
    pub service_name: String,
    pub renewal_date: Option<NaiveDate>,
    pub send_date: Option<NaiveDate>,
    pub sent: bool,
    pub category: Option<String>,
    pub cost: Option<f64>,
}

impl Reminder {
    /// Normalizes a record; `position` keys rows that carry no id at all.
    pub fn from_record(record: ReminderRecord, position: usize) -> Self {
        let key = record
            .reminder_id
            .or(record.id)
            .map(|id| id.to_string())
            .or_else(|| record.subscription_id.map(|id| format!("subscription-{id}")))
            .unwrap_or_else(|| format!("row-{position}"));

        let renewal = record
            .current_period_end
            .as_deref()
            .or(record.renewal_date.as_deref());

        Reminder {
            key,
            service_name: record.service_name.unwrap_or_default(),
            renewal_date: parse_date("renewal_date", renewal),
            send_date: parse_date("send_date", record.send_date.as_deref()),
            sent: record.sent.unwrap_or(false),
            category: non_blank(record.category),
            cost: record.cost.as_ref().and_then(WireAmount::value),
        }
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

pub fn normalize_reminders(records: Vec<ReminderRecord>) -> Vec<Reminder> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| Reminder::from_record(record, position))
        .collect()
}

#[derive(Clone, Debug, Deserialize)]
pub struct SummaryRecord {
    total_monthly_cost: Option<WireAmount>,
    total_annual_cost: Option<WireAmount>,
    #[serde(default)]
    cost_by_category: BTreeMap<String, WireAmount>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total_monthly_cost: f64,
    pub total_annual_cost: f64,
    /// Category name to cost, ordered by name.
    pub cost_by_category: BTreeMap<String, f64>,
}

impl From<SummaryRecord> for Summary {
    fn from(record: SummaryRecord) -> Self {
        let amount = |value: Option<WireAmount>| {
            value.as_ref().and_then(WireAmount::value).unwrap_or(0.0)
        };
        Summary {
            total_monthly_cost: amount(record.total_monthly_cost),
            total_annual_cost: amount(record.total_annual_cost),
            cost_by_category: record
                .cost_by_category
                .into_iter()
                .filter_map(|(category, cost)| cost.value().map(|cost| (category, cost)))
                .collect(),
        }
    }
}

/// POST /subscriptions body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewSubscription {
    pub service_name: String,
    pub cost: f64,
    pub renewal_date: NaiveDate,
    pub category: String,
    pub payment_status: String,
}

/// PATCH /subscriptions/{id} body. The renewal date is fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubscriptionPatch {
    pub service_name: String,
    pub cost: f64,
    pub category: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    ServiceName,
    Cost,
    Category,
    RenewalDate,
}

/// Raw form input while a subscription is being added or modified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscriptionDraft {
    pub service_name: String,
    pub cost: String,
    pub category: String,
    pub renewal_date: String,
}

impl SubscriptionDraft {
    pub fn from_subscription(subscription: &Subscription) -> Self {
        SubscriptionDraft {
            service_name: subscription.service_name.clone(),
            cost: subscription.cost.to_string(),
            category: subscription.category.clone().unwrap_or_default(),
            renewal_date: String::new(),
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::ServiceName => self.service_name = value,
            DraftField::Cost => self.cost = value,
            DraftField::Category => self.category = value,
            DraftField::RenewalDate => self.renewal_date = value,
        }
    }

    fn common_fields(&self) -> Result<(String, f64, String), String> {
        let service_name = self.service_name.trim();
        if service_name.is_empty() {
            return Err("Service name is required.".to_string());
        }

        let cost = self
            .cost
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|cost| cost.is_finite() && *cost >= 0.0)
            .ok_or_else(|| "Cost must be a number of zero or more.".to_string())?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err("Please select a category.".to_string());
        }

        Ok((service_name.to_string(), cost, category.to_string()))
    }

    pub fn to_new_subscription(&self) -> Result<NewSubscription, String> {
        let (service_name, cost, category) = self.common_fields()?;
        let renewal_date = NaiveDate::parse_from_str(self.renewal_date.trim(), DATE_FORMAT)
            .map_err(|_| "Renewal date is required.".to_string())?;

        Ok(NewSubscription {
            service_name,
            cost,
            renewal_date,
            category,
            payment_status: DEFAULT_PAYMENT_STATUS.to_string(),
        })
    }

    pub fn to_patch(&self) -> Result<SubscriptionPatch, String> {
        let (service_name, cost, category) = self.common_fields()?;
        Ok(SubscriptionPatch {
            service_name,
            cost,
            category,
        })
    }
}
