//! The attract-demo sequence: the perpetual idle loop of title pages,
//! credit pages and recorded demos shown when no game is active. Entered
//! at startup or when a game ends, exited the instant a game starts.

/// The seven stops of the attract cycle, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoPage {
    TitleScreen,
    /// The title page again with the advisory notice patch overlaid.
    AdvisoryScreen,
    Demo1,
    CreditScreen,
    Demo2,
    /// Shareware builds advertise the full game here; others repeat the
    /// credits.
    OrderOrCreditScreen,
    Demo3,
}

impl DemoPage {
    const CYCLE: [DemoPage; 7] = [
        DemoPage::TitleScreen,
        DemoPage::AdvisoryScreen,
        DemoPage::Demo1,
        DemoPage::CreditScreen,
        DemoPage::Demo2,
        DemoPage::OrderOrCreditScreen,
        DemoPage::Demo3,
    ];

    pub const fn index(self) -> usize {
        match self {
            DemoPage::TitleScreen => 0,
            DemoPage::AdvisoryScreen => 1,
            DemoPage::Demo1 => 2,
            DemoPage::CreditScreen => 3,
            DemoPage::Demo2 => 4,
            DemoPage::OrderOrCreditScreen => 5,
            DemoPage::Demo3 => 6,
        }
    }

    pub const fn is_demo(self) -> bool {
        matches!(self, DemoPage::Demo1 | DemoPage::Demo2 | DemoPage::Demo3)
    }

    const fn next(self) -> Self {
        Self::CYCLE[(self.index() + 1) % Self::CYCLE.len()]
    }
}

/// What the game should do after an advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceAction {
    /// Show a full-screen page for a while. `advisory` asks for the
    /// advisory patch on top.
    ShowPage {
        name: &'static str,
        tics: i32,
        advisory: bool,
    },
    /// Defer playback of a built-in demo lump; duration-driven, not
    /// tic-driven.
    PlayDemo(&'static str),
}

/// Countdown state for the current page. The timer only runs on timed
/// pages; demo pages advance when playback reports completion.
#[derive(Debug)]
pub struct DemoSequence {
    page: DemoPage,
    /// Tics left on the current timed page.
    page_tics: i32,
    started: bool,
}

impl DemoSequence {
    pub fn new() -> Self {
        Self {
            // First advance lands on the title page.
            page: DemoPage::Demo3,
            page_tics: 0,
            started: false,
        }
    }

    pub const fn page(&self) -> DemoPage {
        self.page
    }

    /// Restart the cycle from the title, as `D_StartTitle` does.
    pub fn reset(&mut self) {
        self.page = DemoPage::Demo3;
        self.started = false;
    }

    /// Decrement the page timer. Returns true when the page has run out
    /// and the sequence should advance.
    pub fn ticker(&mut self) -> bool {
        if !self.started || self.page.is_demo() {
            return !self.started;
        }
        self.page_tics -= 1;
        self.page_tics < 0
    }

    /// Step to the next page, skipping demo pages entirely when internal
    /// demos are disabled. Never fails and never terminates: the cycle
    /// wraps modulo seven.
    pub fn advance(&mut self, internal_demos: bool, shareware: bool) -> SequenceAction {
        self.started = true;
        self.page = self.page.next();
        if !internal_demos && self.page.is_demo() {
            // Bypass straight to the next timed page.
            self.page = self.page.next();
        }

        let action = match self.page {
            DemoPage::TitleScreen => SequenceAction::ShowPage {
                name: "TITLE",
                tics: 210,
                advisory: false,
            },
            DemoPage::AdvisoryScreen => SequenceAction::ShowPage {
                name: "TITLE",
                tics: 140,
                advisory: true,
            },
            DemoPage::CreditScreen => SequenceAction::ShowPage {
                name: "CREDIT",
                tics: 200,
                advisory: false,
            },
            DemoPage::OrderOrCreditScreen => SequenceAction::ShowPage {
                name: if shareware { "ORDER" } else { "CREDIT" },
                tics: 200,
                advisory: false,
            },
            DemoPage::Demo1 => SequenceAction::PlayDemo("demo1"),
            DemoPage::Demo2 => SequenceAction::PlayDemo("demo2"),
            DemoPage::Demo3 => SequenceAction::PlayDemo("demo3"),
        };

        if let SequenceAction::ShowPage { tics, .. } = action {
            self.page_tics = tics;
        }
        action
    }
}

impl Default for DemoSequence {
    fn default() -> Self {
        Self::new()
    }
}
