// Word polarities on a [-1, 1] scale, tuned for financial headlines.
pub(super) const WORDS: &[(&str, f64)] = &[
    // general positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("positive", 0.23),
    ("happy", 0.8),
    ("success", 0.6),
    ("successful", 0.75),
    ("impressive", 1.0),
    ("optimistic", 0.6),
    ("confident", 0.5),
    ("favorable", 0.6),
    ("solid", 0.4),
    ("strong", 0.43),
    ("stronger", 0.5),
    ("robust", 0.5),
    ("healthy", 0.5),
    ("win", 0.8),
    ("wins", 0.8),
    ("innovative", 0.5),
    ("promising", 0.5),
    ("attractive", 0.5),
    ("upbeat", 0.6),
    // market positive
    ("gain", 0.4),
    ("gains", 0.4),
    ("rally", 0.5),
    ("rallies", 0.5),
    ("surge", 0.6),
    ("surges", 0.6),
    ("soar", 0.6),
    ("soars", 0.6),
    ("jump", 0.4),
    ("jumps", 0.4),
    ("rise", 0.3),
    ("rises", 0.3),
    ("climb", 0.3),
    ("climbs", 0.3),
    ("beat", 0.5),
    ("beats", 0.5),
    ("exceed", 0.5),
    ("exceeds", 0.5),
    ("outperform", 0.6),
    ("outperforms", 0.6),
    ("upgrade", 0.6),
    ("upgraded", 0.6),
    ("bullish", 0.7),
    ("profit", 0.4),
    ("profitable", 0.5),
    ("growth", 0.4),
    ("record", 0.3),
    ("rebound", 0.4),
    ("recovery", 0.4),
    ("boost", 0.5),
    ("boosts", 0.5),
    ("expansion", 0.3),
    ("dividend", 0.2),
    ("buyback", 0.3),
    ("upside", 0.4),
    ("tailwind", 0.4),
    ("breakthrough", 0.7),
    // general negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("poor", -0.4),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("negative", -0.3),
    ("fail", -0.5),
    ("fails", -0.5),
    ("failed", -0.5),
    ("failure", -0.6),
    ("weak", -0.38),
    ("weaker", -0.4),
    ("worried", -0.5),
    ("worry", -0.5),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("fear", -0.5),
    ("fears", -0.5),
    ("disappointing", -0.6),
    ("disappoints", -0.6),
    ("pessimistic", -0.6),
    ("uncertain", -0.3),
    ("uncertainty", -0.3),
    ("trouble", -0.4),
    ("risky", -0.4),
    ("fraud", -0.8),
    // market negative
    ("loss", -0.4),
    ("losses", -0.4),
    ("decline", -0.4),
    ("declines", -0.4),
    ("drop", -0.4),
    ("drops", -0.4),
    ("fall", -0.4),
    ("falls", -0.4),
    ("slump", -0.6),
    ("slumps", -0.6),
    ("plunge", -0.7),
    ("plunges", -0.7),
    ("crash", -0.8),
    ("crashes", -0.8),
    ("tumble", -0.6),
    ("tumbles", -0.6),
    ("miss", -0.5),
    ("misses", -0.5),
    ("downgrade", -0.6),
    ("downgraded", -0.6),
    ("underperform", -0.6),
    ("bearish", -0.7),
    ("lawsuit", -0.5),
    ("investigation", -0.4),
    ("probe", -0.4),
    ("recall", -0.4),
    ("layoffs", -0.5),
    ("bankruptcy", -0.9),
    ("default", -0.6),
    ("recession", -0.6),
    ("headwind", -0.4),
    ("headwinds", -0.4),
    ("downside", -0.4),
    ("overvalued", -0.4),
    ("selloff", -0.6),
    ("volatile", -0.2),
];

pub(super) const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("highly", 1.3),
    ("sharply", 1.3),
    ("significantly", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];
