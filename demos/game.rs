use std::rc::Rc;

use rustc_hash::FxHashMap;
use scope_rt::{
    build_root, Context, EmptyExport, Export, Factory, MutableStream, Scope, Stream, ValueStream,
};

type Players = Vec<String>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Score {
    pub wins: FxHashMap<String, u32>,
}

// export records

struct RootExports {
    players: Rc<dyn Stream<Players>>,
    mutable_players: Rc<dyn MutableStream<Players>>,
}

impl Export for RootExports {
    type Parent = ();

    fn parent(&self) -> &() {
        &()
    }
}

struct LoggedInExports {
    score: Rc<dyn Stream<Score>>,
    mutable_score: Rc<dyn MutableStream<Score>>,
    parent: Rc<RootExports>,
}

impl Export for LoggedInExports {
    type Parent = RootExports;

    fn parent(&self) -> &RootExports {
        &self.parent
    }
}

type LoggedOutExports = EmptyExport<RootExports>;
type GameExports = EmptyExport<LoggedInExports>;

// The score sheet opens from both the logged-in shell and the game screen, so
// its factory is generic over any parent that can surface the score stream.
trait ScoreScope {
    fn score(&self) -> Rc<dyn Stream<Score>>;
}

impl ScoreScope for LoggedInExports {
    fn score(&self) -> Rc<dyn Stream<Score>> {
        Rc::clone(&self.score)
    }
}

impl<P> ScoreScope for EmptyExport<P>
where
    P: ScoreScope + 'static,
{
    fn score(&self) -> Rc<dyn Stream<Score>> {
        (**self).score()
    }
}

// screens

struct RootScreen {
    players: Rc<dyn Stream<Players>>,
    logged_out: Factory<LoggedOutScreen>,
    logged_in: Factory<LoggedInScreen>,
}

struct LoggedOutScreen {
    mutable_players: Rc<dyn MutableStream<Players>>,
}

impl LoggedOutScreen {
    fn login(&self, player1: &str, player2: &str) {
        self.mutable_players
            .set(vec![player1.to_string(), player2.to_string()]);
    }
}

struct LoggedInScreen {
    game: Factory<GameScreen>,
    score_sheet: Factory<ScoreSheetScreen>,
    score: Rc<dyn Stream<Score>>,
}

struct GameScreen {
    players: Rc<dyn Stream<Players>>,
    mutable_score: Rc<dyn MutableStream<Score>>,
    score_sheet: Factory<ScoreSheetScreen>,
}

impl GameScreen {
    fn record_win(&self, winner: &str) {
        let mut score = self.mutable_score.get();
        *score.wins.entry(winner.to_string()).or_insert(0) += 1;
        self.mutable_score.set(score);
    }
}

struct ScoreSheetScreen {
    score: Rc<dyn Stream<Score>>,
}

// scope factories

fn create_root_scope(ctx: Context<RootExports>) -> Scope<RootScreen, RootExports> {
    let logged_out = ctx.factory_maker().bind(create_logged_out_scope);
    let logged_in = ctx.factory_maker().bind(create_logged_in_scope);

    let players = Rc::new(ValueStream::new(Players::new()));
    let screen = RootScreen {
        players: players.clone(),
        logged_out,
        logged_in,
    };

    Scope::new(
        screen,
        RootExports {
            players: players.clone(),
            mutable_players: players,
        },
    )
}

fn create_logged_out_scope(
    ctx: Context<LoggedOutExports>,
) -> Scope<LoggedOutScreen, LoggedOutExports> {
    let screen = LoggedOutScreen {
        mutable_players: Rc::clone(&ctx.mutable_players),
    };

    Scope::new(screen, EmptyExport::new(ctx.parent_export()))
}

fn create_logged_in_scope(
    ctx: Context<LoggedInExports>,
) -> Scope<LoggedInScreen, LoggedInExports> {
    let game = ctx.factory_maker().bind(create_game_scope);
    let score_sheet = ctx.factory_maker().bind(create_score_sheet_scope);

    let score = Rc::new(ValueStream::new(Score::default()));
    let screen = LoggedInScreen {
        game,
        score_sheet,
        score: score.clone(),
    };

    Scope::new(
        screen,
        LoggedInExports {
            score: score.clone(),
            mutable_score: score,
            parent: ctx.parent_export(),
        },
    )
}

fn create_game_scope(ctx: Context<GameExports>) -> Scope<GameScreen, GameExports> {
    let score_sheet = ctx.factory_maker().bind(create_score_sheet_scope);

    let screen = GameScreen {
        players: Rc::clone(&ctx.parent().players),
        mutable_score: Rc::clone(&ctx.mutable_score),
        score_sheet,
    };

    Scope::new(screen, EmptyExport::new(ctx.parent_export()))
}

fn create_score_sheet_scope<P>(
    ctx: Context<EmptyExport<P>>,
) -> Scope<ScoreSheetScreen, EmptyExport<P>>
where
    P: ScoreScope + 'static,
{
    let screen = ScoreSheetScreen { score: ctx.score() };

    Scope::new(screen, EmptyExport::new(ctx.parent_export()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let root = build_root(create_root_scope);

    let logged_out = root.logged_out.build();
    logged_out.login("naomi", "jules");
    println!("logged in: {:?}", root.players.get());

    let logged_in = root.logged_in.build();
    let game = logged_in.game.build();
    println!("game between {:?}", game.players.get());

    let sheet = game.score_sheet.build();
    sheet
        .score
        .subscribe(Box::new(|score| println!("score changed: {:?}", score)));

    game.record_win("naomi");
    game.record_win("jules");
    game.record_win("naomi");

    println!("shell score view: {:?}", logged_in.score.get());
    println!("final: {:?}", logged_in.score_sheet.build().score.get());
}
