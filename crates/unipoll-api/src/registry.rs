// DPI category and application names
//
// The controller reports DPI buckets as numeric `(cat, app)` pairs. These
// static tables turn them into labels sinks can tag with; unknown codes
// get a placeholder that still carries the numbers.

/// Category names indexed by category id.
const CATEGORIES: &[(u32, &str)] = &[
    (0, "Instant Messengers"),
    (1, "Peer-to-Peer Networks"),
    (3, "File Sharing"),
    (4, "Media Streaming"),
    (5, "Mail and Collaboration"),
    (6, "Voice over IP"),
    (7, "Database"),
    (8, "Games"),
    (9, "Network Management"),
    (10, "Remote Access Terminals"),
    (11, "Bypass Proxies and Tunnels"),
    (12, "Stock Market"),
    (13, "Web"),
    (14, "Security Update"),
    (15, "Web IM"),
    (17, "Business"),
    (18, "Network Protocols"),
    (19, "Network Protocols"),
    (20, "Network Protocols"),
    (23, "Private Protocol"),
    (24, "Social Network"),
    (255, "Unknown"),
];

/// Application names keyed by `(cat, app)`, sorted for binary search.
const APPLICATIONS: &[((u32, u32), &str)] = &[
    ((0, 1), "MSN"),
    ((0, 2), "Yahoo Messenger"),
    ((0, 3), "AIM/ICQ"),
    ((0, 5), "IRC"),
    ((0, 6), "Jabber"),
    ((0, 20), "WhatsApp"),
    ((0, 22), "Telegram"),
    ((1, 1), "BitTorrent"),
    ((1, 2), "eDonkey"),
    ((1, 6), "Gnutella"),
    ((3, 1), "FTP"),
    ((3, 10), "Dropbox"),
    ((3, 21), "OneDrive"),
    ((3, 25), "Google Drive"),
    ((4, 3), "RTSP"),
    ((4, 5), "YouTube"),
    ((4, 17), "Netflix"),
    ((4, 19), "Spotify"),
    ((4, 28), "Twitch"),
    ((5, 1), "SMTP"),
    ((5, 2), "POP3"),
    ((5, 3), "IMAP"),
    ((5, 10), "Gmail"),
    ((5, 12), "Outlook"),
    ((6, 1), "SIP"),
    ((6, 2), "Skype"),
    ((6, 15), "Zoom"),
    ((6, 18), "Microsoft Teams"),
    ((7, 1), "MySQL"),
    ((7, 2), "PostgreSQL"),
    ((8, 4), "Steam"),
    ((8, 9), "Xbox Live"),
    ((8, 10), "PlayStation Network"),
    ((9, 1), "SNMP"),
    ((9, 2), "Syslog"),
    ((9, 3), "NTP"),
    ((10, 1), "SSH"),
    ((10, 2), "Telnet"),
    ((10, 3), "RDP"),
    ((10, 4), "VNC"),
    ((11, 1), "OpenVPN"),
    ((11, 2), "Tor"),
    ((11, 5), "IPsec"),
    ((13, 1), "HTTP"),
    ((13, 2), "HTTPS"),
    ((13, 7), "Google"),
    ((13, 15), "Amazon"),
    ((13, 33), "Apple"),
    ((14, 1), "Windows Update"),
    ((14, 2), "Apple Update"),
    ((18, 1), "DNS"),
    ((18, 2), "DHCP"),
    ((18, 6), "mDNS"),
    ((20, 1), "ICMP"),
    ((24, 1), "Facebook"),
    ((24, 2), "Twitter"),
    ((24, 3), "LinkedIn"),
    ((24, 9), "Instagram"),
    ((24, 17), "TikTok"),
];

/// Human name of a DPI category, or `"Unknown (N)"`.
pub fn category(cat: i64) -> String {
    u32::try_from(cat)
        .ok()
        .and_then(|c| {
            CATEGORIES
                .binary_search_by_key(&c, |(id, _)| *id)
                .ok()
                .and_then(|i| CATEGORIES.get(i))
        })
        .map_or_else(|| format!("Unknown ({cat})"), |(_, name)| (*name).to_owned())
}

/// Human name of a DPI application, or `"Unknown (cat:app)"`.
///
/// Application ids are only unique within their category.
pub fn application(cat: i64, app: i64) -> String {
    u32::try_from(cat)
        .ok()
        .zip(u32::try_from(app).ok())
        .and_then(|key| {
            APPLICATIONS
                .binary_search_by_key(&key, |(k, _)| *k)
                .ok()
                .and_then(|i| APPLICATIONS.get(i))
        })
        .map_or_else(
            || format!("Unknown ({cat}:{app})"),
            |(_, name)| (*name).to_owned(),
        )
}
