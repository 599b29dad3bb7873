//! The portfolio document and its built-in default payload.
//!
//! A [`PortfolioDocument`] is an opaque JSON value. Nothing in this crate
//! validates its shape before persisting it; whatever a caller writes is
//! echoed back verbatim on the next read. The [`content`](crate::content)
//! module offers an optional typed view over the well-known sections.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::content::{PortfolioContent, Venture};
use crate::error::ContentError;

/// The singleton portfolio document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioDocument(Value);

impl PortfolioDocument {
    /// Wrap an arbitrary JSON value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The content seeded into an empty store and served whenever the store
    /// cannot produce a document of its own.
    #[must_use]
    pub fn builtin() -> Self {
        Self(builtin_payload())
    }

    /// Parse a serialized payload.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Malformed`] if `text` is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        serde_json::from_str(text)
            .map(Self)
            .map_err(|e| ContentError::Malformed {
                reason: e.to_string(),
            })
    }

    /// Serialize the payload for storage.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ContentError> {
        serde_json::to_string(&self.0).map_err(|e| ContentError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Interpret the payload through the typed view.
    ///
    /// Unknown fields are kept, so converting back loses nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Malformed`] if a well-known section has the
    /// wrong shape (e.g. `ventures` is not a list).
    pub fn content(&self) -> Result<PortfolioContent, ContentError> {
        PortfolioContent::deserialize(&self.0).map_err(|e| ContentError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Find the venture whose detail route is `/{slug}`.
    ///
    /// Only the `ventures` list is consulted and only the matching entry is
    /// read through the typed view, so other sections may hold anything.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Malformed`] if the matching entry has the
    /// wrong shape (e.g. a numeric `title`).
    pub fn venture(&self, slug: &str) -> Result<Option<Venture>, ContentError> {
        let entry = self
            .0
            .get("ventures")
            .and_then(Value::as_array)
            .and_then(|ventures| ventures.iter().find(|v| venture_slug(v) == Some(slug)));

        match entry {
            Some(entry) => Venture::deserialize(entry)
                .map(Some)
                .map_err(|e| ContentError::Malformed {
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Borrow the raw JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for PortfolioDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[allow(clippy::too_many_lines)]
/// `link` without its leading `/`.
fn venture_slug(entry: &Value) -> Option<&str> {
    entry.get("link")?.as_str()?.strip_prefix('/')
}

fn builtin_payload() -> Value {
    json!({
        "hero": {
            "name": "Mahdi Ashabil",
            "title": "IT Manager • Entrepreneur • Simple Person",
            "image": "https://picsum.photos/seed/mahdi/400/400"
        },
        "about": {
            "text1": "I'm Mahdi Ashabil, a simple person with a passion for technology and business. I currently work as a Manager at Syntax Academy, and I also handle IT management at TM Fahim Education—two separate educational institutions where I oversee operations and technical infrastructure.",
            "text2": "Alongside my IT career, I am the proud owner of Wrapify, a business dedicated to creating and selling customized gift products. Whether it's managing complex IT systems or delivering personalized gifts to make people smile, I focus on quality, efficiency, and care.",
            "stats": [
                { "label": "Years in IT", "value": "5+" },
                { "label": "Gifts Delivered", "value": "1000+" },
                { "label": "Projects Managed", "value": "50+" },
                { "label": "Happy Clients", "value": "100%" }
            ]
        },
        "skills": [
            { "name": "IT Management", "icon": "Server", "color": "from-cyan-400 to-blue-500" },
            { "name": "E-commerce", "icon": "ShoppingBag", "color": "from-violet-400 to-fuchsia-500" },
            { "name": "IT Operations", "icon": "Terminal", "color": "from-emerald-400 to-cyan-500" },
            { "name": "Business Ops", "icon": "Briefcase", "color": "from-orange-400 to-red-500" }
        ],
        "ventures": [
            {
                "title": "Wrapify",
                "role": "Owner & Founder",
                "desc": "A customized gift product store bringing smiles through personalized items.",
                "img": "https://picsum.photos/seed/wrapify/600/800",
                "tag": "E-commerce",
                "link": "/wrapify",
                "details": {
                    "subtitle": "Customized Gift Products",
                    "description": "Wrapify is a business dedicated to creating and selling customized gift products. We focus on delivering personalized gifts to make people smile, ensuring quality, efficiency, and care in every package.",
                    "links": [
                        { "name": "Website", "url": "https://www.wrapifybd.online", "type": "Globe" },
                        { "name": "Facebook", "url": "https://www.facebook.com/profile.php?id=61582984047027", "type": "Facebook" },
                        { "name": "Instagram", "url": "https://www.instagram.com/wrapify_online", "type": "Instagram" },
                        { "name": "TikTok", "url": "https://www.tiktok.com/@wrapify_online", "type": "TikTok" }
                    ]
                }
            },
            {
                "title": "Syntax Academy",
                "role": "Manager",
                "desc": "Managing operations and ensuring smooth educational workflows at Syntax Academy.",
                "img": "https://picsum.photos/seed/syntax/600/800",
                "tag": "Education Management",
                "link": "/syntax",
                "details": {
                    "subtitle": "Educational Institution",
                    "description": "Syntax Academy is a premier educational institution where I serve as Manager. We are dedicated to providing top-tier educational workflows, ensuring students and educators have the best environment to succeed.",
                    "links": [
                        { "name": "Website", "url": "https://www.syntax.fahimsir.com", "type": "Globe" },
                        { "name": "Facebook", "url": "https://www.facebook.com/syntax.fahimsir", "type": "Facebook" },
                        { "name": "Instagram", "url": "https://www.instagram.com/syntax.kulaura", "type": "Instagram" }
                    ]
                }
            },
            {
                "title": "TM Fahim Education",
                "role": "IT Manager",
                "desc": "Overseeing technical infrastructure and IT operations for TM Fahim Education.",
                "img": "https://picsum.photos/seed/tmfahim/600/800",
                "tag": "IT Management",
                "link": "/tmfahim",
                "details": {
                    "subtitle": "Educational Platform",
                    "description": "TM Fahim Education is an educational platform where I serve as the IT Manager. My role involves overseeing technical operations and infrastructure to ensure a seamless learning experience for all users.",
                    "links": [
                        { "name": "Facebook", "url": "https://www.facebook.com/profile.php?id=61583322341626", "type": "Facebook" }
                    ]
                }
            }
        ],
        "achievements": [
            { "title": "Launched Wrapify", "year": "2024", "icon": "Gift", "color": "text-yellow-400" },
            { "title": "IT Infrastructure Setup", "year": "2023", "icon": "ShieldCheck", "color": "text-cyan-400" },
            { "title": "1000+ Happy Customers", "year": "2023", "icon": "Heart", "color": "text-violet-400" }
        ],
        "socials": [
            { "name": "Facebook", "url": "https://www.facebook.com/mahdi.ashabil.islam", "type": "Facebook" },
            { "name": "Instagram", "url": "https://www.instagram.com/mahdi.ashabil", "type": "Instagram" },
            { "name": "WhatsApp", "url": "https://wa.me/8801307502546", "type": "WhatsApp" },
            { "name": "TikTok", "url": "https://www.tiktok.com/@mahdiashabil", "type": "TikTok" },
            { "name": "LinkedIn", "url": "#", "type": "Linkedin" },
            { "name": "Twitter", "url": "https://x.com/mahdiashabil69", "type": "Twitter" }
        ]
    })
}
