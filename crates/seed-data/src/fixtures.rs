//! Fixed structural data: teams, heroes and the activity catalogue.

pub struct HeroFixture {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
}

pub struct TeamFixture {
    pub name: &'static str,
    pub description: &'static str,
    pub heroes: &'static [HeroFixture],
}

pub struct ActivityFixture {
    pub name: &'static str,
    pub description: &'static str,
    pub points_per_unit: i32,
    pub unit: &'static str,
}

const fn hero(
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
) -> HeroFixture {
    HeroFixture {
        first_name,
        last_name,
        email,
    }
}

const fn activity(
    name: &'static str,
    description: &'static str,
    points_per_unit: i32,
    unit: &'static str,
) -> ActivityFixture {
    ActivityFixture {
        name,
        description,
        points_per_unit,
        unit,
    }
}

/// Teams in creation order; Marvel's heroes are created before DC's.
pub const TEAMS: [TeamFixture; 2] = [
    TeamFixture {
        name: "Team Marvel",
        description: "Earth's Mightiest Heroes fighting for fitness!",
        heroes: &[
            hero("Tony", "Stark", "ironman@marvel.com"),
            hero("Steve", "Rogers", "captain@marvel.com"),
            hero("Natasha", "Romanoff", "blackwidow@marvel.com"),
            hero("Bruce", "Banner", "hulk@marvel.com"),
            hero("Thor", "Odinson", "thor@asgard.com"),
            hero("Clint", "Barton", "hawkeye@marvel.com"),
            hero("Wanda", "Maximoff", "scarletwitch@marvel.com"),
            hero("Peter", "Parker", "spiderman@marvel.com"),
        ],
    },
    TeamFixture {
        name: "Team DC",
        description: "Justice League members staying in superhero shape!",
        heroes: &[
            hero("Clark", "Kent", "superman@dc.com"),
            hero("Bruce", "Wayne", "batman@dc.com"),
            hero("Diana", "Prince", "wonderwoman@dc.com"),
            hero("Barry", "Allen", "flash@dc.com"),
            hero("Arthur", "Curry", "aquaman@dc.com"),
            hero("Hal", "Jordan", "greenlantern@dc.com"),
            hero("Victor", "Stone", "cyborg@dc.com"),
            hero("Oliver", "Queen", "greenarrow@dc.com"),
        ],
    },
];

pub const ACTIVITIES: [ActivityFixture; 8] = [
    activity("Running", "Outdoor or treadmill running", 10, "minutes"),
    activity("Push-ups", "Classic upper body exercise", 1, "reps"),
    activity("Cycling", "Bike riding or stationary cycling", 8, "minutes"),
    activity("Swimming", "Pool or open water swimming", 15, "minutes"),
    activity("Yoga", "Mind and body wellness", 5, "minutes"),
    activity("Weight Lifting", "Strength training with weights", 12, "minutes"),
    activity("Squats", "Lower body strength exercise", 1, "reps"),
    activity("Plank", "Core strengthening exercise", 2, "minutes"),
];
