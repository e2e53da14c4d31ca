//! Demo members loaded at startup.

use crate::{OnlineStatus, UserId, UserProfile};

/// Members the demo user starts out friends with (Jessica and Elena).
pub const FRIEND_IDS: [UserId; 2] = [UserId(1), UserId(6)];

struct Seed {
    id: u32,
    name: &'static str,
    age: u8,
    location: &'static str,
    photo: u32,
    status: OnlineStatus,
    bio: &'static str,
    interests: &'static [&'static str],
    gallery: [u32; 2],
    looking_for: &'static [&'static str],
    relationship_status: &'static str,
}

impl Seed {
    fn into_profile(self) -> UserProfile {
        let mut gallery_images = vec![gallery_url(self.photo)];
        gallery_images.extend(self.gallery.iter().map(|id| gallery_url(*id)));
        UserProfile {
            id: UserId(self.id),
            name: self.name.to_string(),
            age: self.age,
            location: self.location.to_string(),
            image_url: format!("https://picsum.photos/id/{}/400/500", self.photo),
            status: self.status,
            bio: self.bio.to_string(),
            interests: self.interests.iter().map(|s| s.to_string()).collect(),
            gallery_images,
            looking_for: self.looking_for.iter().map(|s| s.to_string()).collect(),
            relationship_status: self.relationship_status.to_string(),
        }
    }
}

fn gallery_url(photo: u32) -> String {
    format!("https://picsum.photos/id/{photo}/800/600")
}

pub fn profiles() -> Vec<UserProfile> {
    use OnlineStatus::*;

    let seeds = [
        Seed {
            id: 1,
            name: "Jessica, 28",
            age: 28,
            location: "Miami, FL",
            photo: 1027,
            status: Online,
            bio: "Spontaneous adventurer seeking a partner in crime. Love hiking, trying new foods, and live music. I believe life is about collecting experiences, not things. Looking for someone genuine, kind, and ready for an adventure.",
            interests: &["Travel", "Foodie", "Concerts", "Hiking", "Photography", "Wine Tasting"],
            gallery: [1015, 1025],
            looking_for: &["Single Men", "Couples"],
            relationship_status: "Single",
        },
        Seed {
            id: 2,
            name: "Mark, 32",
            age: 32,
            location: "Austin, TX",
            photo: 1005,
            status: Away,
            bio: "Software engineer by day, musician by night. Looking for someone to share good conversations and vinyl records with. My ideal night is a mix of intellectual chat and great music.",
            interests: &["Music", "Tech", "Coffee", "Dogs", "Vinyl Records"],
            gallery: [1006, 1009],
            looking_for: &["Single Women"],
            relationship_status: "Single",
        },
        Seed {
            id: 3,
            name: "Sophia & Leo, 29 & 31",
            age: 29,
            location: "Denver, CO",
            photo: 1012,
            status: Online,
            bio: "We enjoy exploring the mountains and cozy nights in. Open-minded couple looking for new friends to share adventures with. We love board games, cooking together, and watching old movies.",
            interests: &["Skiing", "Board Games", "Cooking", "Movies"],
            gallery: [1013, 1014],
            looking_for: &["Single Men", "Single Women", "Couples"],
            relationship_status: "In a relationship",
        },
        Seed {
            id: 4,
            name: "Chloe, 26",
            age: 26,
            location: "Los Angeles, CA",
            photo: 1011,
            status: Offline,
            bio: "Artist and creative soul. My passions are painting, photography, and exploring art galleries. I draw inspiration from the city and nature. Looking for a deep, meaningful connection.",
            interests: &["Art", "Photography", "Museums", "Yoga"],
            gallery: [1020, 1021],
            looking_for: &["Single Men", "Single Women"],
            relationship_status: "Single",
        },
        Seed {
            id: 5,
            name: "David, 35",
            age: 35,
            location: "Chicago, IL",
            photo: 1013,
            status: Online,
            bio: "Architect with a love for design and history. Enjoy cycling along the lakefront and discovering hidden gems in the city. Also a huge fan of live jazz and deep-dish pizza.",
            interests: &["Architecture", "Cycling", "History", "Jazz"],
            gallery: [1031, 1032],
            looking_for: &["Single Women"],
            relationship_status: "Single",
        },
        Seed {
            id: 6,
            name: "Elena, 30",
            age: 30,
            location: "New York, NY",
            photo: 1022,
            status: Online,
            bio: "Fashion designer who thrives on the city's energy. Let's grab a coffee and see where it goes. I'm passionate about my work, but I also love to unwind with a good book or a Broadway show.",
            interests: &["Fashion", "Brunch", "Theater", "Reading"],
            gallery: [1035, 1036],
            looking_for: &["Single Men", "Couples"],
            relationship_status: "Single",
        },
        Seed {
            id: 7,
            name: "Alex & Mia, 33 & 30",
            age: 33,
            location: "Seattle, WA",
            photo: 103,
            status: Away,
            bio: "Tech-savvy couple who love video games, sci-fi, and our two cats. Seeking fellow geeks for game nights or discussing the latest sci-fi blockbuster.",
            interests: &["Gaming", "Sci-Fi", "Cats", "Coding"],
            gallery: [104, 106],
            looking_for: &["Couples"],
            relationship_status: "Married",
        },
        Seed {
            id: 8,
            name: "Ben, 40",
            age: 40,
            location: "San Francisco, CA",
            photo: 1040,
            status: Offline,
            bio: "Entrepreneur and fitness enthusiast. I believe in a healthy body and mind. Let's motivate each other to be our best selves, whether it's in the gym or launching a new project.",
            interests: &["Fitness", "Startups", "Meditation", "Healthy Eating"],
            gallery: [1043, 1044],
            looking_for: &["Single Women"],
            relationship_status: "Divorced",
        },
        Seed {
            id: 9,
            name: "Olivia, 24",
            age: 24,
            location: "Boston, MA",
            photo: 1041,
            status: Online,
            bio: "Grad student in literature. Can be found with my nose in a book or exploring historic cobblestone streets. I love coffee shops, rainy days, and intellectual conversations.",
            interests: &["Reading", "History", "Cafes", "Running"],
            gallery: [1045, 1048],
            looking_for: &["Single Men"],
            relationship_status: "Single",
        },
        Seed {
            id: 10,
            name: "Liam, 29",
            age: 29,
            location: "Portland, OR",
            photo: 1062,
            status: Online,
            bio: "Craft beer aficionado and outdoor lover. Always up for a hike followed by a visit to a new brewery. Sustainability is important to me.",
            interests: &["Craft Beer", "Hiking", "Camping", "Sustainability"],
            gallery: [1054, 1053],
            looking_for: &["Single Women"],
            relationship_status: "Single",
        },
        Seed {
            id: 11,
            name: "Ava & Noah, 27 & 28",
            age: 27,
            location: "San Diego, CA",
            photo: 1074,
            status: Online,
            bio: "Beach lovers and surfers. We live for sunny days and good vibes. Looking for like-minded people to hang out with, catch some waves, and enjoy a bonfire.",
            interests: &["Surfing", "Beach", "Tacos", "Live Music"],
            gallery: [1078, 1080],
            looking_for: &["Couples"],
            relationship_status: "Engaged",
        },
        Seed {
            id: 12,
            name: "Isabella, 31",
            age: 31,
            location: "New Orleans, LA",
            photo: 1084,
            status: Away,
            bio: "Chef with a passion for Creole cuisine. My life is all about food, music, and the vibrant culture of my city. There's always a festival to go to or a new dish to try.",
            interests: &["Cooking", "Jazz", "Festivals", "Culture"],
            gallery: [20, 22],
            looking_for: &["Single Men", "Single Women"],
            relationship_status: "Single",
        },
    ];

    seeds.into_iter().map(Seed::into_profile).collect()
}
