//! Conversations the demo user starts every session with.

use crate::{Message, MessageId, Sender};
use chrono::{DateTime, Duration, Utc};
use swingsfab_profiles::UserId;

struct SeedMessage {
    id: u64,
    text: &'static str,
    sender: Sender,
    minutes_ago: i64,
    read: bool,
    saved: bool,
}

fn msg(id: u64, text: &'static str, sender: Sender, minutes_ago: i64, read: bool) -> SeedMessage {
    SeedMessage {
        id,
        text,
        sender,
        minutes_ago,
        read,
        saved: false,
    }
}

fn saved(message: SeedMessage) -> SeedMessage {
    SeedMessage {
        saved: true,
        ..message
    }
}

const HOUR: i64 = 60;

/// Histories with Jessica (1), Mark (2), Sophia & Leo (3) and Elena (6).
pub fn messages(now: DateTime<Utc>) -> Vec<(UserId, Vec<Message>)> {
    use Sender::{Me, Them};

    let threads: [(u32, Vec<SeedMessage>); 4] = [
        (
            1,
            vec![
                msg(1, "Hey, I saw your profile and love your adventurous spirit!", Them, 65, true),
                msg(2, "Thanks! Your profile looks great too. That picture from the concert is awesome.", Me, 63, true),
                saved(msg(3, "Haha, that was a fun night. We should definitely grab a drink sometime and trade travel stories.", Them, 62, true)),
                msg(4, "I'd love that! Are you free this weekend?", Me, 60, true),
                msg(5, "I am! How about Saturday evening at The Cozy Spot?", Them, 5, false),
            ],
        ),
        (
            2,
            vec![
                msg(1, "Your taste in music is impeccable. Vinyls are the best!", Me, 25 * HOUR, true),
                msg(2, "Right? Nothing beats that warm sound. What have you been listening to lately?", Them, 24 * HOUR, true),
                msg(3, "Been spinning the new album from The War on Drugs. It's fantastic.", Me, 23 * HOUR, true),
            ],
        ),
        (
            3,
            vec![
                msg(1, "Hi! We saw you're into board games. We're always looking for another player for our game nights.", Them, 48 * HOUR, true),
                msg(2, "Hey! That sounds like a lot of fun. What games do you usually play?", Me, 47 * HOUR, true),
            ],
        ),
        (
            6,
            vec![
                saved(msg(1, "Hi Olivia! I love your style. That cafe photo is so chic.", Them, 72 * HOUR, true)),
                msg(2, "Thank you so much! You have a great eye for fashion yourself. Love your designs.", Me, 71 * HOUR, true),
                msg(3, "We should connect! Maybe grab a coffee and talk shop?", Them, 70 * HOUR, true),
            ],
        ),
    ];

    threads
        .into_iter()
        .map(|(counterpart, seeds)| {
            let messages = seeds
                .into_iter()
                .map(|seed| Message {
                    id: MessageId(seed.id),
                    text: seed.text.to_string(),
                    sender: seed.sender,
                    date: now - Duration::minutes(seed.minutes_ago),
                    read: Some(seed.read),
                    saved: seed.saved.then_some(true),
                })
                .collect();
            (UserId(counterpart), messages)
        })
        .collect()
}
