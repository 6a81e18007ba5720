//! Static source tables. Adapters receive these through their constructors.

use crate::models::Region;

/// WeWorkRemotely category feeds, most broadly useful first.
pub const WWR_FEEDS: &[&str] = &[
    "https://weworkremotely.com/categories/remote-programming-jobs.rss",
    "https://weworkremotely.com/categories/remote-customer-support-jobs.rss",
    "https://weworkremotely.com/categories/remote-product-jobs.rss",
    "https://weworkremotely.com/categories/remote-devops-sysadmin-jobs.rss",
    "https://weworkremotely.com/categories/remote-finance-legal-jobs.rss",
    "https://weworkremotely.com/categories/remote-business-exec-management-jobs.rss",
];

/// Feeds polled when the candidate targets a concrete country.
pub const LOCAL_FOCUS_WWR_FEEDS: usize = 3;

pub const REMOTEOK_FEED: &str = "https://remoteok.com/remote-jobs.rss";
pub const JOBICY_FEED: &str = "https://jobicy.com/feed/newjobs";

/// Employers queried on the Lever postings API (India-focused plus global).
pub const LEVER_COMPANIES: &[&str] = &[
    "meesho",
    "cred",
    "razorpay",
    "groww",
    "zerodha",
    "phonepe",
    "swiggy",
    "zomato",
    "ola",
    "flipkart",
    "paytm",
    "dream11",
    "slice",
    "jupiter",
    "fi-money",
    "smallcase",
    "cleartax",
    "browserstack",
    "postman",
    "freshworks",
    "zoho",
    "chargebee",
];

/// Keyword lists per region. Trailing spaces keep abbreviations like "est " from matching "estimate".
pub const REGION_KEYWORDS: &[(Region, &[&str])] = &[
    (
        Region::Americas,
        &[
            "americas",
            "north america",
            "est ",
            "pst ",
            "cst ",
            "us only",
            "usa only",
            "eastern time",
            "pacific time",
        ],
    ),
    (
        Region::Europe,
        &["emea", "europe", "cet ", "gmt", "uk only", "european hours"],
    ),
    (
        Region::Asia,
        &[
            "apac",
            "asia",
            "ist ",
            "india",
            "singapore",
            "bangalore",
            "bengaluru",
            "mumbai",
            "delhi",
            "hyderabad",
        ],
    ),
    (
        Region::Global,
        &[
            "anywhere",
            "worldwide",
            "global",
            "any timezone",
            "fully remote",
            "work from anywhere",
        ],
    ),
];
