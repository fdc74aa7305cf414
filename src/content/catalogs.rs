//! Fixed content catalogs.
//!
//! Catalogs are plain data tables picked from uniformly at random; extending
//! a catalog never touches the scheduler or the router.

use rand::Rng;

/// A meme: caption plus hosted image.
#[derive(Debug, Clone, Copy)]
pub struct Meme {
    pub caption: &'static str,
    pub photo_url: &'static str,
}

pub const MEMES: &[Meme] = &[
    Meme {
        caption: "😂 When ETH pumps during the Blood Moon:",
        photo_url: "https://i.imgur.com/crypto-meme1.jpg",
    },
    Meme {
        caption: "🤔 HODL or sell before the eclipse?",
        photo_url: "https://i.imgur.com/crypto-meme2.jpg",
    },
];

pub const EDUCATIONAL: &[&str] = &[
    "💡 What is DeFi? Decentralized finance allows lending, trading and earning without a middleman.",
    "💡 What is an NFT? A unique digital asset whose ownership is recorded on-chain.",
    "💡 What is staking? It's the process of locking crypto to secure a network and earn rewards.",
];

pub const SCAM_WARNINGS: &[&str] = &[
    "⚠️ Warning: New scam with fake XRP airdrop - don't share your keys!",
    "⚠️ Beware of phishing: Fake \"free BTC\" sites are after your passwords!",
];

pub const GAME_CHALLENGES: &[&str] = &[
    "🎲 Guess which coin grew the most today and win 0.001 ETH! Post your answer here by 20:00 CET.",
    "🎲 First to name yesterday's biggest loser wins a shoutout. Answers by 20:00 CET!",
];

pub const STORIES: &[&str] = &[
    "📜 How one trader made $1M from SHIB: Started with $100 in 2020...",
    "📜 Bitcoin's story: From 1 BTC = $0.0008 to $70K today!",
];

pub const TRADING_TIPS: &[&str] = &[
    "📊 Buy at support, sell at resistance - example with BTC: support $70K, resistance $75K.",
    "📊 Don't chase trends - wait for confirmation before entering a trade!",
];

/// Poll posted on the daily schedule.
pub const DAILY_POLL_QUESTION: &str = "Will ETH reach $3000 by the end of March?";

/// Poll sent in reply to the poll command.
pub const COMMAND_POLL_QUESTION: &str = "Will ETH rise after the Blood Moon?";

pub const POLL_OPTIONS: &[&str] = &["Yes", "No"];

/// Posted once on the fixed calendar date.
pub const BLOOD_MOON_EVENT: &str =
    "🌑 Blood Moon Eclipse Now (13 Mar 2025)!\nETH sentiment: 60% bullish! Watch the skies and markets!";

/// Sent in reply to the bloodmoon command.
pub const BLOOD_MOON_INFO: &str =
    "🌑 Blood Moon Eclipse on 13-14 Mar 2025!\nWatch ETH - 60% bullish sentiment might spike!";

/// Uniform random pick from a fixed catalog.
pub fn pick<T>(items: &[T]) -> &T {
    let mut rng = rand::thread_rng();
    &items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_stay_inside_the_catalog() {
        for _ in 0..200 {
            let tip = pick(TRADING_TIPS);
            assert!(TRADING_TIPS.contains(tip));

            let snippet = pick(EDUCATIONAL);
            assert!(EDUCATIONAL.contains(snippet));

            let warning = pick(SCAM_WARNINGS);
            assert!(SCAM_WARNINGS.contains(warning));

            let story = pick(STORIES);
            assert!(STORIES.contains(story));

            let meme = pick(MEMES);
            assert!(MEMES.iter().any(|m| m.caption == meme.caption));
        }
    }

    #[test]
    fn every_member_is_eventually_drawn() {
        let mut seen = vec![false; EDUCATIONAL.len()];
        for _ in 0..500 {
            let snippet = pick(EDUCATIONAL);
            let idx = EDUCATIONAL.iter().position(|s| s == snippet).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "uniform pick never drew a member");
    }
}
