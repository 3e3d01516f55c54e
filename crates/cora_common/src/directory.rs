//! Customer directory - static sample data and lookups
//!
//! The directory is the deterministic data layer behind the support flows:
//! customer accounts keyed by mobile number, the plan catalog, retail store
//! locations, and the FAQ corpus. All lookups are plain filtering over
//! in-process data; there is no external storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Billing state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Paid,
    Due,
    Overdue,
}

/// A customer account record
///
/// The NRIC is held in full here but must never leave the daemon; API
/// responses carry verification booleans only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAccount {
    pub name: String,
    /// Normalized local mobile (8 digits, no country prefix)
    pub mobile: String,
    pub nric: String,
    pub plan_id: String,
    pub outstanding_cents: i64,
    pub bill_due_date: NaiveDate,
    pub data_used_mb: u32,
    pub payment_status: PaymentStatus,
}

impl CustomerAccount {
    /// Last 4 characters of the NRIC, used as the second auth factor
    pub fn nric_last4(&self) -> &str {
        let n = self.nric.len();
        &self.nric[n.saturating_sub(4)..]
    }
}

/// A mobile plan in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingPlan {
    pub id: String,
    pub name: String,
    pub monthly_cents: i64,
    pub data_gb: u32,
    pub talktime_mins: u32,
    pub sms_count: u32,
    pub perks: Vec<String>,
}

/// A retail store location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub opening_hours: String,
}

/// A FAQ entry with search keywords
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
}

/// Normalize a raw mobile number to the canonical 8-digit local form.
///
/// Accepts spaces, dashes and parentheses, and an optional `+65`/`65`
/// country prefix. Singapore mobiles are 8 digits starting with 8 or 9;
/// anything else is rejected.
pub fn normalize_mobile(raw: &str) -> Option<String> {
    let mut digits = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '(' | ')' | '+' => {}
            _ => return None,
        }
    }

    let local = if digits.len() == 10 && digits.starts_with("65") {
        &digits[2..]
    } else {
        digits.as_str()
    };

    if local.len() == 8 && (local.starts_with('8') || local.starts_with('9')) {
        Some(local.to_string())
    } else {
        None
    }
}

/// The in-process customer directory
#[derive(Debug, Clone)]
pub struct CustomerDirectory {
    customers: Vec<CustomerAccount>,
    plans: Vec<BillingPlan>,
    stores: Vec<StoreLocation>,
    faqs: Vec<FaqEntry>,
}

impl CustomerDirectory {
    /// Build the directory with the bundled sample data set
    pub fn sample() -> Self {
        Self {
            customers: sample_customers(),
            plans: sample_plans(),
            stores: sample_stores(),
            faqs: sample_faqs(),
        }
    }

    /// Look up an account by its normalized mobile number
    pub fn find_by_mobile(&self, normalized: &str) -> Option<&CustomerAccount> {
        self.customers.iter().find(|c| c.mobile == normalized)
    }

    /// Look up a plan by id
    pub fn plan(&self, id: &str) -> Option<&BillingPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn plans(&self) -> &[BillingPlan] {
        &self.plans
    }

    pub fn stores(&self) -> &[StoreLocation] {
        &self.stores
    }

    /// Stores whose postal code starts with the given district prefix
    pub fn stores_near(&self, postal_prefix: &str) -> Vec<&StoreLocation> {
        if postal_prefix.is_empty() {
            return self.stores.iter().collect();
        }
        self.stores
            .iter()
            .filter(|s| s.postal_code.starts_with(postal_prefix))
            .collect()
    }

    /// Keyword search over the FAQ corpus.
    ///
    /// Scores each entry by the number of query terms that hit the question
    /// text or the keyword list; ties keep corpus order. An empty query
    /// returns nothing.
    pub fn search_faq(&self, query: &str, limit: usize) -> Vec<(&FaqEntry, u32)> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(&FaqEntry, u32)> = Vec::new();
        for entry in &self.faqs {
            let question = entry.question.to_lowercase();
            let mut score = 0u32;
            for term in &terms {
                if question.contains(term.as_str())
                    || entry.keywords.iter().any(|k| k.to_lowercase().contains(term.as_str()))
                {
                    score += 1;
                }
            }
            if score > 0 {
                hits.push((entry, score));
            }
        }

        // Stable sort keeps corpus order for equal scores
        hits.sort_by(|a, b| b.1.cmp(&a.1));
        hits.truncate(limit);
        hits
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn customers(&self) -> &[CustomerAccount] {
        &self.customers
    }
}

impl Default for CustomerDirectory {
    fn default() -> Self {
        Self::sample()
    }
}

fn sample_customers() -> Vec<CustomerAccount> {
    vec![
        CustomerAccount {
            name: "Tan Wei Ming".to_string(),
            mobile: "91234567".to_string(),
            nric: "S1234567D".to_string(),
            plan_id: "core-lite".to_string(),
            outstanding_cents: 4250,
            bill_due_date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            data_used_mb: 3_210,
            payment_status: PaymentStatus::Due,
        },
        CustomerAccount {
            name: "Nurul Huda".to_string(),
            mobile: "98765432".to_string(),
            nric: "S9876543A".to_string(),
            plan_id: "core-plus".to_string(),
            outstanding_cents: 0,
            bill_due_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            data_used_mb: 18_400,
            payment_status: PaymentStatus::Paid,
        },
        CustomerAccount {
            name: "Priya Rajan".to_string(),
            mobile: "87654321".to_string(),
            nric: "T0246813J".to_string(),
            plan_id: "core-max".to_string(),
            outstanding_cents: 12_990,
            bill_due_date: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
            data_used_mb: 61_750,
            payment_status: PaymentStatus::Overdue,
        },
        CustomerAccount {
            name: "Marcus Lim".to_string(),
            mobile: "96543210".to_string(),
            nric: "S7531598Z".to_string(),
            plan_id: "family-share".to_string(),
            outstanding_cents: 8_920,
            bill_due_date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            data_used_mb: 44_100,
            payment_status: PaymentStatus::Due,
        },
        CustomerAccount {
            name: "Chen Xiu Ying".to_string(),
            mobile: "82345678".to_string(),
            nric: "T1357924B".to_string(),
            plan_id: "sim-only".to_string(),
            outstanding_cents: 0,
            bill_due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            data_used_mb: 940,
            payment_status: PaymentStatus::Paid,
        },
        CustomerAccount {
            name: "David Ong".to_string(),
            mobile: "90011223".to_string(),
            nric: "S2468135C".to_string(),
            plan_id: "core-plus".to_string(),
            outstanding_cents: 6_540,
            bill_due_date: NaiveDate::from_ymd_opt(2026, 8, 22).unwrap(),
            data_used_mb: 27_300,
            payment_status: PaymentStatus::Due,
        },
    ]
}

fn sample_plans() -> Vec<BillingPlan> {
    vec![
        BillingPlan {
            id: "core-lite".to_string(),
            name: "Core Lite".to_string(),
            monthly_cents: 2_590,
            data_gb: 5,
            talktime_mins: 200,
            sms_count: 200,
            perks: vec!["Free caller ID".to_string()],
        },
        BillingPlan {
            id: "core-plus".to_string(),
            name: "Core Plus".to_string(),
            monthly_cents: 3_990,
            data_gb: 30,
            talktime_mins: 500,
            sms_count: 500,
            perks: vec![
                "Free caller ID".to_string(),
                "1GB free roaming data".to_string(),
            ],
        },
        BillingPlan {
            id: "core-max".to_string(),
            name: "Core Max 5G".to_string(),
            monthly_cents: 6_590,
            data_gb: 100,
            talktime_mins: 1_000,
            sms_count: 1_000,
            perks: vec![
                "5G priority network".to_string(),
                "Free caller ID".to_string(),
                "3GB free roaming data".to_string(),
            ],
        },
        BillingPlan {
            id: "family-share".to_string(),
            name: "Family Share".to_string(),
            monthly_cents: 8_990,
            data_gb: 150,
            talktime_mins: 2_000,
            sms_count: 2_000,
            perks: vec![
                "Up to 4 shared SIMs".to_string(),
                "Free caller ID".to_string(),
            ],
        },
        BillingPlan {
            id: "sim-only".to_string(),
            name: "SIM Only Saver".to_string(),
            monthly_cents: 1_500,
            data_gb: 10,
            talktime_mins: 100,
            sms_count: 100,
            perks: vec!["No contract".to_string()],
        },
    ]
}

fn sample_stores() -> Vec<StoreLocation> {
    vec![
        StoreLocation {
            id: "orchard".to_string(),
            name: "Cora Store Orchard".to_string(),
            address: "31 Exeter Road, Comcentre".to_string(),
            postal_code: "239732".to_string(),
            opening_hours: "Mon-Sun 10:00-20:00".to_string(),
        },
        StoreLocation {
            id: "vivocity".to_string(),
            name: "Cora Store VivoCity".to_string(),
            address: "1 HarbourFront Walk, #02-121".to_string(),
            postal_code: "098585".to_string(),
            opening_hours: "Mon-Sun 11:00-21:00".to_string(),
        },
        StoreLocation {
            id: "tampines".to_string(),
            name: "Cora Store Tampines Mall".to_string(),
            address: "4 Tampines Central 5, #03-28".to_string(),
            postal_code: "529510".to_string(),
            opening_hours: "Mon-Sun 11:00-21:00".to_string(),
        },
        StoreLocation {
            id: "jurong".to_string(),
            name: "Cora Store Jurong Point".to_string(),
            address: "1 Jurong West Central 2, #B1-92".to_string(),
            postal_code: "648886".to_string(),
            opening_hours: "Mon-Sun 11:00-21:30".to_string(),
        },
    ]
}

fn sample_faqs() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            id: "roaming-activate".to_string(),
            question: "How do I activate data roaming before travelling?".to_string(),
            answer: "Enable roaming in the app under Mobile > Add-ons > Roaming, or dial *100#. \
                     Activation takes effect within 30 minutes."
                .to_string(),
            keywords: vec!["roaming".to_string(), "overseas".to_string(), "travel".to_string()],
        },
        FaqEntry {
            id: "bill-payment".to_string(),
            question: "What payment methods can I use for my bill?".to_string(),
            answer: "Bills can be paid via GIRO, credit card, PayNow, AXS machines, or at any \
                     Cora store."
                .to_string(),
            keywords: vec!["bill".to_string(), "payment".to_string(), "giro".to_string(), "paynow".to_string()],
        },
        FaqEntry {
            id: "giro-setup".to_string(),
            question: "How do I set up GIRO for automatic bill payment?".to_string(),
            answer: "Apply through your bank's internet banking with billing organisation 'Cora', \
                     using your account number as reference. GIRO takes 1-2 bill cycles to start."
                .to_string(),
            keywords: vec!["giro".to_string(), "automatic".to_string(), "bill".to_string()],
        },
        FaqEntry {
            id: "5g-coverage".to_string(),
            question: "Where is 5G coverage available?".to_string(),
            answer: "5G standalone coverage reaches more than 95% of the island. Indoor coverage \
                     in older buildings may fall back to 4G."
                .to_string(),
            keywords: vec!["5g".to_string(), "coverage".to_string(), "network".to_string()],
        },
        FaqEntry {
            id: "sim-replacement".to_string(),
            question: "How do I replace a lost or damaged SIM card?".to_string(),
            answer: "Visit any Cora store with your NRIC for a replacement SIM. A $10 replacement \
                     fee applies for lost cards; damaged cards are replaced free."
                .to_string(),
            keywords: vec!["sim".to_string(), "lost".to_string(), "replacement".to_string()],
        },
        FaqEntry {
            id: "esim-switch".to_string(),
            question: "Can I switch my physical SIM to an eSIM?".to_string(),
            answer: "Yes. Request an eSIM profile in the app under Mobile > SIM Details. Scan the \
                     QR code on your device within 24 hours to activate."
                .to_string(),
            keywords: vec!["esim".to_string(), "sim".to_string(), "switch".to_string()],
        },
        FaqEntry {
            id: "port-in".to_string(),
            question: "How do I port my existing number to Cora?".to_string(),
            answer: "Sign up online or in store and select 'keep my number'. Porting completes \
                     within 1 working day and your old line stays active until cutover."
                .to_string(),
            keywords: vec!["port".to_string(), "transfer".to_string(), "number".to_string()],
        },
        FaqEntry {
            id: "data-topup".to_string(),
            question: "How do I buy a data top-up?".to_string(),
            answer: "Top-ups of 1GB, 3GB or 10GB are available in the app under Mobile > Add-ons. \
                     They are valid until the end of the current bill cycle."
                .to_string(),
            keywords: vec!["data".to_string(), "top-up".to_string(), "topup".to_string(), "add-on".to_string()],
        },
        FaqEntry {
            id: "cancel-plan".to_string(),
            question: "How do I cancel my mobile plan?".to_string(),
            answer: "Contract plans can be cancelled at any Cora store; early termination charges \
                     apply within the commitment period. SIM-only plans can be cancelled in the app."
                .to_string(),
            keywords: vec!["cancel".to_string(), "terminate".to_string(), "contract".to_string()],
        },
        FaqEntry {
            id: "broadband-slow".to_string(),
            question: "My home broadband is slow, what should I check?".to_string(),
            answer: "Reboot your router, test with a wired connection, and check for outages in \
                     the app under Support > Service Status before contacting us."
                .to_string(),
            keywords: vec!["broadband".to_string(), "slow".to_string(), "wifi".to_string(), "router".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mobile_accepts_local_form() {
        assert_eq!(normalize_mobile("91234567"), Some("91234567".to_string()));
        assert_eq!(normalize_mobile("8234 5678"), Some("82345678".to_string()));
    }

    #[test]
    fn test_normalize_mobile_strips_country_prefix() {
        assert_eq!(normalize_mobile("+65 9123 4567"), Some("91234567".to_string()));
        assert_eq!(normalize_mobile("6591234567"), Some("91234567".to_string()));
        assert_eq!(normalize_mobile("+65-8765-4321"), Some("87654321".to_string()));
    }

    #[test]
    fn test_normalize_mobile_rejects_bad_input() {
        // Landline prefix
        assert_eq!(normalize_mobile("61234567"), None);
        // Too short / too long
        assert_eq!(normalize_mobile("9123456"), None);
        assert_eq!(normalize_mobile("912345678"), None);
        // Letters
        assert_eq!(normalize_mobile("9123456a"), None);
        assert_eq!(normalize_mobile(""), None);
    }

    #[test]
    fn test_find_by_mobile() {
        let dir = CustomerDirectory::sample();
        let account = dir.find_by_mobile("91234567").unwrap();
        assert_eq!(account.name, "Tan Wei Ming");
        assert!(dir.find_by_mobile("99999999").is_none());
    }

    #[test]
    fn test_nric_last4() {
        let dir = CustomerDirectory::sample();
        let account = dir.find_by_mobile("91234567").unwrap();
        assert_eq!(account.nric_last4(), "567D");
    }

    #[test]
    fn test_stores_near_prefix() {
        let dir = CustomerDirectory::sample();
        let near = dir.stores_near("52");
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].id, "tampines");

        // Empty prefix means everything
        assert_eq!(dir.stores_near("").len(), dir.stores().len());
        assert!(dir.stores_near("00").is_empty());
    }

    #[test]
    fn test_faq_search_scores_multi_term_higher() {
        let dir = CustomerDirectory::sample();
        let hits = dir.search_faq("giro bill payment", 5);
        assert!(!hits.is_empty());
        // Both giro entries match, but the payment-methods entry hits all
        // three terms
        assert_eq!(hits[0].0.id, "bill-payment");
        assert!(hits[0].1 >= hits[1].1);
    }

    #[test]
    fn test_faq_search_empty_query() {
        let dir = CustomerDirectory::sample();
        assert!(dir.search_faq("", 5).is_empty());
        assert!(dir.search_faq("   ", 5).is_empty());
    }

    #[test]
    fn test_faq_search_respects_limit() {
        let dir = CustomerDirectory::sample();
        let hits = dir.search_faq("sim", 1);
        assert_eq!(hits.len(), 1);
    }
}
