use once_cell::sync::Lazy;
use std::collections::HashSet;

pub static TWITTER_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["twitter.com", "www.twitter.com", "x.com", "www.x.com"])
});

pub static LINKEDIN_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "linkedin.com",
        "www.linkedin.com",
        "lnkd.in",
        "linkedin.at",
        "mobile.linkedin.com",
        "linkedin.co.uk",
    ])
});

pub static CRUNCHBASE_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["crunchbase.com", "www.crunchbase.com"])
});

pub static WIKIDATA_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["wikidata.org", "www.wikidata.org"])
});

pub static GITHUB_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "github.com",
        "www.github.com",
        "gist.github.com",
        "raw.githubusercontent.com",
    ])
});

/// Also matched as the last two labels of any longer host (language subdomains)
pub static WIKIPEDIA_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["en.wikipedia.org", "en.m.wikipedia.org", "wikipedia.org"])
});

pub static GRAVATAR_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["gravatar.com", "www.gravatar.com"])
});

/// Profile, social and people-search sites beyond the platforms with dedicated extractors
const OTHER_WELL_KNOWN_DOMAINS: &[&str] = &[
    "angel.co",
    "theorg.com",
    "entrepreneur.com",
    "forbes.com",
    "producthunt.com",
    "slideshare.net",
    "medium.com",
    "substack.com",
    "dev.to",
    "youtube.com",
    "m.youtube.com",
    "youtu.be",
    "stackoverflow.com",
    "wellfound.com",
    "indeed.com",
    "plus.google.com",
    "google.com",
    "quora.com",
    "flickr.com",
    "instagram.com",
    "tiktok.com",
    "reddit.com",
    "old.reddit.com",
    "discord.com",
    "hubspot.com",
    "thefactual.com",
    "facebook.com",
    "www.facebook.com",
    "m.facebook.com",
    "fastpeoplesearch.com",
    "researchgate.net",
    "imdb.com",
    "waatp.com",
    "dbpedia.org",
    "yahoo.com",
    "classmates.com",
    "pinterest.com",
    "tumblr.com",
    "twitch.tv",
    "vimeo.com",
    "soundcloud.com",
    "behance.net",
    "dribbble.com",
    "threads.net",
    "bsky.app",
    "mastodon.social",
    "linktr.ee",
    "about.me",
    "patreon.com",
    "kaggle.com",
    "gitlab.com",
    "bitbucket.org",
    "npmjs.com",
    "news.ycombinator.com",
    "ycombinator.com",
    "glassdoor.com",
    "pitchbook.com",
    "snapchat.com",
    "t.me",
    "angellist.com",
];

/// Union of every platform set and the extra well-known domains
pub static WELL_KNOWN_PLATFORM_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        &*LINKEDIN_DOMAINS,
        &*TWITTER_DOMAINS,
        &*WIKIDATA_DOMAINS,
        &*WIKIPEDIA_DOMAINS,
        &*GITHUB_DOMAINS,
        &*CRUNCHBASE_DOMAINS,
        &*GRAVATAR_DOMAINS,
    ]
    .into_iter()
    .flat_map(|set| set.iter().copied())
    .chain(OTHER_WELL_KNOWN_DOMAINS.iter().copied())
    .collect()
});

/// Consumer mailbox providers whose domains say nothing about a person's business
pub static EMAIL_PROVIDER_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Global
        "gmail.com", "googlemail.com", "yahoo.com", "ymail.com", "rocketmail.com",
        "hotmail.com", "outlook.com", "live.com", "msn.com", "icloud.com", "me.com",
        "mac.com", "apple.com", "aol.com", "protonmail.com", "protonmail.ch", "zoho.com",
        "yandex.com", "mail.com", "email.com", "gmx.com", "gmx.net", "fastmail.fm",
        "games.com", "hush.com", "hushmail.com", "iname.com", "inbox.com", "lavabit.com",
        "love.com", "pobox.com", "tutanota.de", "tutanota.com", "tutamail.com", "tuta.io",
        "keemail.me", "safe-mail.net", "wow.com", "ygm.com", "facebook.com", "google.com",
        // US ISPs
        "comcast.net", "att.net", "sbcglobal.net", "verizon.net", "bellsouth.net",
        "charter.net", "cox.net", "earthlink.net", "juno.com",
        // UK
        "hotmail.co.uk", "live.co.uk", "btinternet.com", "virginmedia.com",
        "blueyonder.co.uk", "freeserve.co.uk", "ntlworld.com", "o2.co.uk", "orange.net",
        "sky.com", "talktalk.co.uk", "tiscali.co.uk", "virgin.net", "wanadoo.co.uk",
        "bt.com", "yahoo.co.uk",
        // Asia
        "qq.com", "sina.com", "sina.cn", "naver.com", "hanmail.net", "daum.net",
        "nate.com", "yahoo.co.jp", "yahoo.co.kr", "yahoo.co.id", "yahoo.co.in",
        "yahoo.com.sg", "yahoo.com.ph", "163.com", "yeah.net", "126.com", "21cn.com",
        "aliyun.com", "foxmail.com", "rediffmail.com",
        // France
        "hotmail.fr", "live.fr", "laposte.net", "wanadoo.fr", "orange.fr", "gmx.fr",
        "sfr.fr", "neuf.fr", "free.fr", "yahoo.fr",
        // Germany
        "gmx.de", "hotmail.de", "live.de", "online.de", "t-online.de", "web.de",
        "yahoo.de",
        // Italy
        "libero.it", "virgilio.it", "hotmail.it", "aol.it", "tiscali.it", "alice.it",
        "live.it", "email.it", "tin.it", "poste.it", "teletu.it", "yahoo.it",
        // Russia
        "mail.ru", "rambler.ru", "yandex.ru", "ya.ru", "list.ru",
        // Belgium
        "hotmail.be", "live.be", "skynet.be", "voo.be", "tvcablenet.be", "telenet.be",
        // Argentina
        "hotmail.com.ar", "live.com.ar", "fibertel.com.ar", "speedy.com.ar",
        "arnet.com.ar", "yahoo.com.ar",
        // Mexico and Spain
        "live.com.mx", "hotmail.es", "hotmail.com.mx", "prodigy.net.mx", "yahoo.com.mx",
        // Canada
        "hotmail.ca", "bell.net", "shaw.ca", "sympatico.ca", "rogers.com", "yahoo.ca",
        // Brazil
        "hotmail.com.br", "outlook.com.br", "uol.com.br", "bol.com.br", "terra.com.br",
        "ig.com.br", "itelefonica.com.br", "r7.com", "zipmail.com.br", "globo.com",
        "globomail.com", "oi.com.br", "yahoo.com.br",
    ]
    .into_iter()
    .collect()
});

/// Provider families rejected under any TLD, e.g. `yahoo.com.au` or `gmail.de`
pub const EMAIL_PROVIDER_PREFIXES: [&str; 4] = ["yahoo.", "gmail.", "hotmail.", "live."];
