//! BlockType, Insert, Block, Script, and the closed `Command` catalogue
//! that stands in for the source's string-keyed block ids: unknown
//! commands are a compile-time-checkable closed set, modulo the
//! `_workaround` fallback.

use crate::value::Value;

/// A block's execution shape. Hats never evaluate as expressions;
/// c-shape blocks carry an unevaluated nested body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    Hat,
    Stack,
    Reporter,
    Boolean,
    CShape,
    Cap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    Number,
    StringKind,
    Var,
    ListKind,
    Sound,
    SpriteOrStage,
    SpriteOrMouse,
    StageOrThis,
    SpriteOnly,
    Touching,
    ReadonlyMenu,
    Key,
    ColorKind,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertShape {
    StringShape,
    ReadonlyMenu,
    NumberShape,
    BooleanShape,
    StackShape,
    AnyShape,
}

/// A typed argument-slot descriptor. `unevaluated` is set
/// for the single body slot of a c-shape block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insert {
    pub kind: InsertKind,
    pub shape: InsertShape,
    pub unevaluated: bool,
}

impl Insert {
    pub const fn new(kind: InsertKind, shape: InsertShape) -> Self {
        Self { kind, shape, unevaluated: false }
    }

    pub const fn body() -> Self {
        Self { kind: InsertKind::Any, shape: InsertShape::StackShape, unevaluated: true }
    }

    /// Valid key names for a `key` insert (`kurt.Insert(None, "key").options()`).
    pub fn key_options() -> &'static [&'static str] {
        &[
            "space", "up arrow", "down arrow", "left arrow", "right arrow", "any",
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o",
            "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
            "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
        ]
    }
}

/// The closed catalogue of block commands. One variant per
/// stable command id in the source; hat variants are listed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Motion
    MoveSteps,
    TurnLeft,
    TurnRight,
    PointInDirection,
    PointTowards,
    GoToXY,
    GoToSprite,
    GlideSecsToXY,
    ChangeXBy,
    SetXTo,
    ChangeYBy,
    SetYTo,
    XPosition,
    YPosition,
    Direction,
    // Looks
    SwitchCostumeTo,
    NextCostume,
    CostumeNumber,
    Say,
    SayForSecs,
    Think,
    ThinkForSecs,
    ChangeEffectBy,
    SetEffectTo,
    ClearGraphicEffects,
    ChangeSizeBy,
    SetSizeTo,
    SizeReporter,
    Show,
    Hide,
    GoToFront,
    GoBackLayers,
    SwitchBackdropTo,
    NextBackdrop,
    BackgroundNumber,
    // Sound
    PlaySound,
    PlaySoundUntilDone,
    StopAllSounds,
    RestForBeats,
    PlayDrumForBeats,
    PlayNoteForBeats,
    SetInstrumentTo,
    ChangeVolumeBy,
    SetVolumeTo,
    VolumeReporter,
    ChangeTempoBy,
    SetTempoToBpm,
    TempoReporter,
    // Pen
    PenClear,
    PenDown,
    PenUp,
    SetPenColorTo,
    ChangePenHueBy,
    SetPenHueTo,
    ChangePenShadeBy,
    SetPenShadeTo,
    ChangePenSizeBy,
    SetPenSizeTo,
    Stamp,
    // Control
    WaitSecs,
    Forever,
    Repeat,
    Broadcast,
    BroadcastAndWait,
    If,
    IfElse,
    WaitUntil,
    RepeatUntil,
    StopScript,
    // Sensing
    Touching,
    TouchingColor,
    ColorIsTouchingColor,
    AskAndWait,
    AnswerReporter,
    MouseX,
    MouseY,
    MouseDown,
    KeyPressed,
    DistanceTo,
    ResetTimer,
    TimerReporter,
    AttributeOf,
    Loudness,
    // Operators
    Add,
    Sub,
    Mul,
    Div,
    PickRandom,
    Eq,
    Lt,
    Gt,
    And,
    Or,
    Not,
    Join,
    LetterOf,
    StringLength,
    Mod,
    RoundOp,
    ComputeFunctionOf,
    // Variables
    VarReporter,
    SetVarTo,
    ChangeVarBy,
    ShowVariable,
    HideVariable,
    // Lists
    ListReporter,
    AddToList,
    DeleteOfList,
    InsertAtOfList,
    ReplaceItemOfWith,
    ItemOfList,
    LineCountOfList,
    ListContains,
    // Hats
    WhenGreenFlag,
    WhenKeyPressed,
    WhenClicked,
    WhenIReceive,
}

impl Command {
    /// The source's stable command id string, used by `has_command` and
    /// error messages. Not every command has a source analogue with a
    /// single canonical phrase; this is a readable stand-in, not a
    /// serialization format.
    pub fn canonical_name(self) -> &'static str {
        use Command::*;
        match self {
            MoveSteps => "move steps",
            TurnLeft => "turn left degrees",
            TurnRight => "turn right degrees",
            PointInDirection => "point in direction",
            PointTowards => "point towards",
            GoToXY => "go to x: y:",
            GoToSprite => "go to",
            GlideSecsToXY => "glide secs to x: y:",
            ChangeXBy => "change x by",
            SetXTo => "set x to",
            ChangeYBy => "change y by",
            SetYTo => "set y to",
            XPosition => "x position",
            YPosition => "y position",
            Direction => "direction",
            SwitchCostumeTo => "switch to costume",
            NextCostume => "next costume",
            CostumeNumber => "costume #",
            Say => "say",
            SayForSecs => "say for secs",
            Think => "think",
            ThinkForSecs => "think for secs",
            ChangeEffectBy => "change effect by",
            SetEffectTo => "set effect to",
            ClearGraphicEffects => "clear graphic effects",
            ChangeSizeBy => "change size by",
            SetSizeTo => "set size to %",
            SizeReporter => "size",
            Show => "show",
            Hide => "hide",
            GoToFront => "go to front",
            GoBackLayers => "go back layers",
            SwitchBackdropTo => "switch backdrop to",
            NextBackdrop => "next backdrop",
            BackgroundNumber => "background #",
            PlaySound => "play sound",
            PlaySoundUntilDone => "play sound until done",
            StopAllSounds => "stop all sounds",
            RestForBeats => "rest for beats",
            PlayDrumForBeats => "play drum for beats",
            PlayNoteForBeats => "play note for beats",
            SetInstrumentTo => "set instrument to",
            ChangeVolumeBy => "change volume by",
            SetVolumeTo => "set volume to",
            VolumeReporter => "volume",
            ChangeTempoBy => "change tempo by",
            SetTempoToBpm => "set tempo to bpm",
            TempoReporter => "tempo",
            PenClear => "clear",
            PenDown => "pen down",
            PenUp => "pen up",
            SetPenColorTo => "penColor:",
            ChangePenHueBy => "changePenHueBy:",
            SetPenHueTo => "setPenHueTo:",
            ChangePenShadeBy => "change pen shade by",
            SetPenShadeTo => "set pen shade to",
            ChangePenSizeBy => "change pen size by",
            SetPenSizeTo => "set pen size to",
            Stamp => "stamp",
            WaitSecs => "wait secs",
            Forever => "forever",
            Repeat => "repeat",
            Broadcast => "broadcast",
            BroadcastAndWait => "broadcast and wait",
            If => "if",
            IfElse => "if else",
            WaitUntil => "wait until",
            RepeatUntil => "repeat until",
            StopScript => "stop",
            Touching => "touching",
            TouchingColor => "touching color",
            ColorIsTouchingColor => "color is touching",
            AskAndWait => "ask and wait",
            AnswerReporter => "answer",
            MouseX => "mouse x",
            MouseY => "mouse y",
            MouseDown => "mouse down?",
            KeyPressed => "key pressed?",
            DistanceTo => "distance to",
            ResetTimer => "reset timer",
            TimerReporter => "timer",
            AttributeOf => "getAttribute:of:",
            Loudness => "loudness",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            PickRandom => "pick random to",
            Eq => "=",
            Lt => "<",
            Gt => ">",
            And => "and",
            Or => "or",
            Not => "not",
            Join => "join",
            LetterOf => "letter of",
            StringLength => "stringLength:",
            Mod => "mod",
            RoundOp => "round",
            ComputeFunctionOf => "computeFunction:of:",
            VarReporter => "var",
            SetVarTo => "set to",
            ChangeVarBy => "change by",
            ShowVariable => "show variable",
            HideVariable => "hide variable",
            ListReporter => "list",
            AddToList => "add to",
            DeleteOfList => "delete of",
            InsertAtOfList => "insert at of",
            ReplaceItemOfWith => "replace item of with",
            ItemOfList => "item of",
            LineCountOfList => "lineCountOfList:",
            ListContains => "contains",
            WhenGreenFlag => "whenGreenFlag",
            WhenKeyPressed => "whenKeyPressed",
            WhenClicked => "whenClicked",
            WhenIReceive => "whenIReceive",
        }
    }

    pub fn shape(self) -> BlockShape {
        use BlockShape::*;
        use Command::*;
        match self {
            WhenGreenFlag | WhenKeyPressed | WhenClicked | WhenIReceive => Hat,
            XPosition | YPosition | Direction | CostumeNumber | SizeReporter
            | BackgroundNumber | VolumeReporter | TempoReporter | AnswerReporter
            | MouseX | MouseY | DistanceTo | TimerReporter | AttributeOf | Loudness
            | Add | Sub | Mul | Div | PickRandom | Join | LetterOf | StringLength
            | Mod | RoundOp | ComputeFunctionOf | VarReporter | ListReporter
            | ItemOfList | LineCountOfList => Reporter,
            Touching | TouchingColor | ColorIsTouchingColor | MouseDown | KeyPressed
            | Eq | Lt | Gt | And | Or | Not | ListContains => Boolean,
            Forever | Repeat | If | IfElse | WaitUntil | RepeatUntil => CShape,
            StopScript => Cap,
            _ => Stack,
        }
    }
}

impl Command {
    /// The canonical insert descriptors for this command, in argument
    /// order — what a project-model loader's `BlockType.get(command)`
    /// would hand back. Fixed per command since the catalogue is
    /// closed; a real loader would instead read these off the parsed
    /// project file.
    pub fn inserts(self) -> Vec<Insert> {
        use Command::*;
        use InsertKind::*;
        use InsertShape::*;

        let n = |shape| Insert::new(Number, shape);
        let s = || Insert::new(StringKind, StringShape);
        let menu = |kind| Insert::new(kind, ReadonlyMenu);
        let any = || Insert::new(Any, AnyShape);
        let boolean = || Insert::new(Any, BooleanShape);
        let var = || Insert::new(Var, AnyShape);
        let list = || Insert::new(ListKind, AnyShape);

        match self {
            // Motion
            MoveSteps | TurnLeft | TurnRight | PointInDirection | ChangeXBy | SetXTo
            | ChangeYBy | SetYTo => vec![n(NumberShape)],
            PointTowards | GoToSprite => vec![menu(SpriteOrMouse)],
            GoToXY => vec![n(NumberShape), n(NumberShape)],
            GlideSecsToXY => vec![n(NumberShape), n(NumberShape), n(NumberShape)],
            XPosition | YPosition | Direction => vec![],

            // Looks
            SwitchCostumeTo | SwitchBackdropTo => vec![menu(Any)],
            NextCostume | CostumeNumber | ClearGraphicEffects | Show | Hide | GoToFront
            | NextBackdrop | BackgroundNumber | SizeReporter => vec![],
            Say | Think => vec![s()],
            SayForSecs | ThinkForSecs => vec![s(), n(NumberShape)],
            ChangeEffectBy | SetEffectTo => vec![menu(Any), n(NumberShape)],
            ChangeSizeBy | SetSizeTo | GoBackLayers => vec![n(NumberShape)],

            // Sound
            PlaySound => vec![menu(Sound)],
            PlaySoundUntilDone => vec![menu(Sound)],
            StopAllSounds | VolumeReporter | TempoReporter => vec![],
            RestForBeats | ChangeVolumeBy | SetVolumeTo | ChangeTempoBy | SetTempoToBpm
            | SetInstrumentTo => vec![n(NumberShape)],
            PlayDrumForBeats | PlayNoteForBeats => vec![n(NumberShape), n(NumberShape)],

            // Pen
            PenClear | PenDown | PenUp | Stamp => vec![],
            SetPenColorTo => vec![Insert::new(ColorKind, AnyShape)],
            ChangePenHueBy | SetPenHueTo | ChangePenShadeBy | SetPenShadeTo
            | ChangePenSizeBy | SetPenSizeTo => vec![n(NumberShape)],

            // Control
            WaitSecs => vec![n(NumberShape)],
            Forever => vec![Insert::body()],
            Repeat => vec![n(NumberShape), Insert::body()],
            Broadcast | BroadcastAndWait => vec![menu(Any)],
            If => vec![boolean(), Insert::body()],
            IfElse => vec![boolean(), Insert::body(), Insert::body()],
            WaitUntil => vec![boolean()],
            RepeatUntil => vec![boolean(), Insert::body()],
            StopScript => vec![menu(Any)],

            // Sensing
            Touching => vec![menu(Touching)],
            TouchingColor => vec![Insert::new(ColorKind, AnyShape)],
            ColorIsTouchingColor => {
                vec![Insert::new(ColorKind, AnyShape), Insert::new(ColorKind, AnyShape)]
            }
            AskAndWait => vec![s()],
            AnswerReporter | MouseX | MouseY | MouseDown | ResetTimer | TimerReporter
            | Loudness => vec![],
            KeyPressed => vec![Insert::new(Key, ReadonlyMenu)],
            DistanceTo => vec![menu(SpriteOrMouse)],
            AttributeOf => vec![menu(Any), menu(SpriteOrStage)],

            // Operators
            Add | Sub | Mul | Div | Mod | PickRandom => vec![n(NumberShape), n(NumberShape)],
            Eq | Lt | Gt => vec![any(), any()],
            And | Or => vec![boolean(), boolean()],
            Not => vec![boolean()],
            Join => vec![s(), s()],
            LetterOf => vec![n(NumberShape), s()],
            StringLength => vec![s()],
            RoundOp => vec![n(NumberShape)],
            ComputeFunctionOf => vec![menu(Any), n(NumberShape)],

            // Variables
            VarReporter | ShowVariable | HideVariable => vec![var()],
            SetVarTo => vec![var(), any()],
            ChangeVarBy => vec![var(), n(NumberShape)],

            // Lists
            ListReporter | LineCountOfList => vec![list()],
            AddToList => vec![any(), list()],
            DeleteOfList => vec![menu(Any), list()],
            InsertAtOfList => vec![any(), menu(Any), list()],
            ReplaceItemOfWith => vec![menu(Any), list(), any()],
            ItemOfList => vec![menu(Any), list()],
            ListContains => vec![list(), any()],

            // Hats
            WhenGreenFlag | WhenClicked => vec![],
            WhenKeyPressed => vec![Insert::new(Key, ReadonlyMenu)],
            WhenIReceive => vec![menu(Any)],
        }
    }
}

/// A stable command, plus insert descriptors and optional alias names /
/// workaround rewriter.
#[derive(Clone)]
pub struct BlockType {
    pub command: Command,
    pub aliases: &'static [&'static str],
    pub inserts: Vec<Insert>,
    pub workaround: Option<fn(&Block) -> Option<Block>>,
}

impl BlockType {
    pub fn new(command: Command, inserts: Vec<Insert>) -> Self {
        Self { command, aliases: &[], inserts, workaround: None }
    }

    /// The BlockType a loader would hand the interpreter for this
    /// command — canonical inserts, no aliases, no workaround
    /// (`kurt.BlockType.get(command)`).
    pub fn for_command(command: Command) -> Self {
        Self::new(command, command.inserts())
    }

    pub fn shape(&self) -> BlockShape {
        self.command.shape()
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.command.canonical_name() == name || self.aliases.contains(&name)
    }
}

/// One argument slot: a literal value, a nested expression block to
/// evaluate, or (for c-shape bodies) a raw, unevaluated block sequence.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Expr(Box<Block>),
    Body(Vec<Block>),
}

impl Arg {
    pub fn text(s: impl Into<String>) -> Self {
        Arg::Value(Value::Text(s.into()))
    }

    pub fn number(n: f64) -> Self {
        Arg::Value(Value::Number(n))
    }
}

/// A block node: a command/reporter/boolean/c-shape identity plus its
/// evaluated-on-demand argument list.
#[derive(Clone)]
pub struct Block {
    pub block_type: BlockType,
    pub args: Vec<Arg>,
}

impl Block {
    pub fn new(block_type: BlockType, args: Vec<Arg>) -> Self {
        Self { block_type, args }
    }
}

/// An ordered sequence of blocks whose first block is a hat (or, when
/// pushed from the REPL, a stack block).
#[derive(Clone, Default)]
pub struct Script {
    pub blocks: Vec<Block>,
}

impl Script {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn hat(&self) -> Option<&Block> {
        self.blocks.first()
    }
}
