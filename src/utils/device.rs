//! Host classification.
//!
//! On the web the user agent comes from `navigator.userAgent`; native builds
//! report themselves as desktop.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

pub fn is_mobile(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// Tablets either name themselves or run android without the `mobi` token.
pub fn is_tablet(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    if ["tablet", "ipad", "playbook", "silk"]
        .iter()
        .any(|marker| ua.contains(marker))
    {
        return true;
    }
    match ua.find("android") {
        Some(idx) => !ua[idx..].contains("mobi"),
        None => false,
    }
}

pub fn is_desktop(user_agent: &str) -> bool {
    !is_mobile(user_agent) && !is_tablet(user_agent)
}

impl DeviceClass {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if is_tablet(user_agent) {
            DeviceClass::Tablet
        } else if is_mobile(user_agent) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let ua = web_sys::window()
                .and_then(|w| w.navigator().user_agent().ok())
                .unwrap_or_default();
            Self::from_user_agent(&ua)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            DeviceClass::Desktop
        }
    }
}

/// Renderer name of the adapter, if the backend exposes one.
pub fn gpu_name(info: Option<&wgpu::AdapterInfo>) -> Option<String> {
    info.map(|info| info.name.trim().to_string())
        .filter(|name| !name.is_empty())
}
