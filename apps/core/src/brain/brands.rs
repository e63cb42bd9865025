//! Brand mention detection.
//!
//! Scans query text for known brand names, case-insensitive, substring
//! containment only. No word-boundary enforcement: "I use Xiaomi" and
//! "xiaomiphone" both match. That is a deliberate precision/recall
//! trade-off inherited from the source dataset and kept for behavioral
//! compatibility.
//!
//! Longer names take precedence over shorter ones that are substrings of
//! them ("Amazon Web Services" before "Amazon"); the table is sorted by
//! descending name length once at construction, never per call.

/// Canonical brand names. Matching lowercases both sides, so each entry's
/// lowercase form is the exact match token. Ties in length keep the
/// declaration order below (the sort is stable).
const BRAND_NAMES: &[&str] = &[
    // Global Tech
    "Adgent", "Google", "Microsoft", "Apple", "Amazon", "Facebook", "Meta", "Twitter", "X",
    "Intel", "Samsung", "Sony", "IBM", "Oracle", "Cisco", "Dell", "HP", "Lenovo", "Huawei",
    "Xiaomi", "Nvidia", "AMD", "ARM", "Palantir",
    // SaaS & Cloud
    "OpenAI", "ChatGPT", "Anthropic", "Claude", "Bard", "Slack", "Asana", "Zoom", "Dropbox",
    "Box", "Figma", "Notion", "Monday", "Airtable", "Shopify", "Stripe", "Zendesk", "HubSpot",
    "Mailchimp", "Salesforce", "Adobe", "Canva", "Atlassian", "Jira", "Confluence", "Trello",
    "Datadog", "Snowflake", "Twilio", "Okta", "Workday", "Service Now", "Splunk", "Tableau",
    "Segment", "Intercom", "Freshdesk", "Zapier", "ClickUp", "Miro", "Lucidchart", "GitHub",
    "GitLab", "Bitbucket", "Docker", "Kubernetes", "Heroku", "Netlify", "Vercel", "AWS",
    "Azure", "GCP", "Google Cloud", "Amazon Web Services",
    // Ecommerce & D2C
    "Nike", "Tesla", "Uber", "Airbnb", "Netflix", "Spotify", "Instacart", "DoorDash", "Lyft",
    "Shein", "Temu", "Alibaba", "AliExpress", "eBay", "Walmart", "Target", "Costco", "Best Buy",
    "Wayfair", "Etsy", "Sephora", "Glossier", "Allbirds", "Warby Parker", "Casper", "Peloton",
    "Patagonia", "Uniqlo", "Zara", "HM", "Lulu", "Lululemon", "Gap", "Old Navy",
    "Banana Republic", "Adidas", "Reebok", "Under Armour", "The North Face", "Columbia",
    // Automotive
    "Ford", "Toyota", "Honda", "BMW", "Mercedes", "Audi", "Volkswagen",
    // Travel & Hospitality
    "Expedia", "Booking.com", "Tripadvisor", "Kayak",
    // Food & Beverage
    "McDonalds", "Starbucks", "Burger King", "Wendys", "KFC", "Dominos", "Pizza Hut", "Pepsi",
    "Coca-Cola",
    // Media & Entertainment
    "Disney", "Warner Bros", "Comcast", "Verizon", "AT&T", "T-Mobile",
    // Financial Services
    "Bank of America", "JPMorgan Chase", "Wells Fargo", "Citigroup", "Goldman Sachs",
    "Morgan Stanley",
    // Niche/Other
    "DuckDuckGo", "Brave", "Vimeo", "SoundCloud", "Substack", "Medium", "Quora", "Reddit",
    "Pinterest", "TikTok", "Snapchat", "Discord", "Twitch", "Kickstarter", "Indiegogo",
    "Coursera", "Udemy", "Khan Academy", "Duolingo", "Robinhood", "Coinbase", "Binance",
    "Square", "Block", "SoFi", "Chime", "Wise", "Revolut", "Monzo", "N26", "TransferWise",
    "Mint", "Intuit", "QuickBooks", "FreshBooks",
];

/// Brand matcher holding the match table pre-sorted longest-first.
pub struct BrandMatcher {
    /// (lowercase match token, canonical name), descending token length.
    brands: Vec<(String, &'static str)>,
}

impl Default for BrandMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl BrandMatcher {
    /// Build the matcher, enforcing the descending-length ordering
    /// invariant once at construction.
    pub fn new() -> Self {
        let mut brands: Vec<(String, &'static str)> = BRAND_NAMES
            .iter()
            .map(|name| (name.to_lowercase(), *name))
            .collect();
        brands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self { brands }
    }

    /// Return the first (longest) brand whose name appears in `text`,
    /// case-insensitive. Total over all inputs; empty text matches
    /// nothing.
    pub fn find(&self, text: &str) -> Option<&'static str> {
        if text.is_empty() {
            return None;
        }

        let t = text.to_lowercase();
        self.brands
            .iter()
            .find(|(token, _)| t.contains(token.as_str()))
            .map(|(_, canonical)| *canonical)
    }
}
