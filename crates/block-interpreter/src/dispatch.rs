//! The dispatch table: an enum-indexed match rather than a dynamic
//! lookup. `compile_command` builds the `Exec` for a stack/c-shape/cap
//! block; `eval_reporter` evaluates a reporter/boolean block to a
//! `Value`. Both are exhaustive over `Command` (modulo the
//! `_workaround` rewrite a BlockType may carry, mirroring the source's
//! `if hasattr(value.type, '_workaround')` fallback).

use block_model::{Block, BlockShape, Command, ScriptableId, Value};

use crate::error::{InterpError, Result};
use crate::exec::{noop, Exec};
use crate::handlers::{control, lists, looks, motion, operators, pen, sensing, sound, variables};
use crate::scheduler::Interpreter;

pub fn compile_command(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    if block.block_type.shape() == BlockShape::Hat {
        return Ok(noop());
    }

    use Command::*;
    match block.block_type.command {
        // Motion
        MoveSteps => motion::compile_move_steps(interp, scriptable, block),
        TurnLeft => motion::compile_turn_left(interp, scriptable, block),
        TurnRight => motion::compile_turn_right(interp, scriptable, block),
        PointInDirection => motion::compile_point_in_direction(interp, scriptable, block),
        PointTowards => motion::compile_point_towards(interp, scriptable, block),
        GoToXY => motion::compile_go_to_xy(interp, scriptable, block),
        GoToSprite => motion::compile_go_to_sprite(interp, scriptable, block),
        GlideSecsToXY => motion::compile_glide(interp, scriptable, block),
        ChangeXBy => motion::compile_change_x(interp, scriptable, block),
        SetXTo => motion::compile_set_x(interp, scriptable, block),
        ChangeYBy => motion::compile_change_y(interp, scriptable, block),
        SetYTo => motion::compile_set_y(interp, scriptable, block),

        // Looks
        SwitchCostumeTo => looks::compile_switch_costume(interp, scriptable, block),
        NextCostume => looks::compile_next_costume(interp, scriptable, block),
        Say => looks::compile_say(interp, scriptable, block),
        SayForSecs => looks::compile_say_for_secs(interp, scriptable, block),
        Think => looks::compile_think(interp, scriptable, block),
        ThinkForSecs => looks::compile_think_for_secs(interp, scriptable, block),
        ChangeEffectBy => looks::compile_change_effect(interp, scriptable, block),
        SetEffectTo => looks::compile_set_effect(interp, scriptable, block),
        ClearGraphicEffects => looks::compile_clear_effects(interp, scriptable, block),
        ChangeSizeBy => looks::compile_change_size(interp, scriptable, block),
        SetSizeTo => looks::compile_set_size(interp, scriptable, block),
        Show => looks::compile_show(interp, scriptable, block),
        Hide => looks::compile_hide(interp, scriptable, block),
        GoToFront => looks::compile_go_to_front(interp, scriptable, block),
        GoBackLayers => looks::compile_go_back_layers(interp, scriptable, block),
        SwitchBackdropTo => looks::compile_switch_backdrop(interp, scriptable, block),
        NextBackdrop => looks::compile_next_backdrop(interp, scriptable, block),

        // Sound
        PlaySound => sound::compile_play_sound(interp, scriptable, block),
        PlaySoundUntilDone => sound::compile_play_sound_until_done(interp, scriptable, block),
        StopAllSounds => sound::compile_stop_all_sounds(interp, scriptable, block),
        RestForBeats => sound::compile_rest_for_beats(interp, scriptable, block),
        PlayDrumForBeats => sound::compile_play_drum(interp, scriptable, block),
        PlayNoteForBeats => sound::compile_play_note(interp, scriptable, block),
        SetInstrumentTo => sound::compile_set_instrument(interp, scriptable, block),
        ChangeVolumeBy => sound::compile_change_volume(interp, scriptable, block),
        SetVolumeTo => sound::compile_set_volume(interp, scriptable, block),
        ChangeTempoBy => sound::compile_change_tempo(interp, scriptable, block),
        SetTempoToBpm => sound::compile_set_tempo(interp, scriptable, block),

        // Pen
        PenClear => pen::compile_pen_clear(interp, scriptable, block),
        PenDown => pen::compile_pen_down(interp, scriptable, block),
        PenUp => pen::compile_pen_up(interp, scriptable, block),
        SetPenColorTo => pen::compile_set_pen_color(interp, scriptable, block),
        ChangePenHueBy => pen::compile_change_pen_hue(interp, scriptable, block),
        SetPenHueTo => pen::compile_set_pen_hue(interp, scriptable, block),
        ChangePenShadeBy => pen::compile_change_pen_shade(interp, scriptable, block),
        SetPenShadeTo => pen::compile_set_pen_shade(interp, scriptable, block),
        ChangePenSizeBy => pen::compile_change_pen_size(interp, scriptable, block),
        SetPenSizeTo => pen::compile_set_pen_size(interp, scriptable, block),
        Stamp => pen::compile_stamp(interp, scriptable, block),

        // Control
        WaitSecs => control::compile_wait_secs(interp, scriptable, block),
        Forever => control::compile_forever(interp, scriptable, block),
        Repeat => control::compile_repeat(interp, scriptable, block),
        Broadcast => control::compile_broadcast(interp, scriptable, block),
        BroadcastAndWait => control::compile_broadcast_and_wait(interp, scriptable, block),
        If => control::compile_if(interp, scriptable, block),
        IfElse => control::compile_if_else(interp, scriptable, block),
        WaitUntil => control::compile_wait_until(interp, scriptable, block),
        RepeatUntil => control::compile_repeat_until(interp, scriptable, block),
        StopScript => control::compile_stop_script(interp, scriptable, block),

        // Sensing
        AskAndWait => sensing::compile_ask_and_wait(interp, scriptable, block),
        ResetTimer => sensing::compile_reset_timer(interp, scriptable, block),

        // Variables
        SetVarTo => variables::compile_set_var_to(interp, scriptable, block),
        ChangeVarBy => variables::compile_change_var_by(interp, scriptable, block),
        ShowVariable => variables::compile_show_variable(interp, scriptable, block),
        HideVariable => variables::compile_hide_variable(interp, scriptable, block),

        // Lists
        AddToList => lists::compile_add_to_list(interp, scriptable, block),
        DeleteOfList => lists::compile_delete_of_list(interp, scriptable, block),
        InsertAtOfList => lists::compile_insert_at_of_list(interp, scriptable, block),
        ReplaceItemOfWith => lists::compile_replace_item_of_with(interp, scriptable, block),

        // Reporters/booleans pushed directly as a (malformed) stack
        // statement: evaluate for effect and discard, rather than fail
        // the whole thread.
        other => {
            if block.block_type.shape() == BlockShape::Reporter || block.block_type.shape() == BlockShape::Boolean {
                eval_reporter(interp, scriptable, block)?;
                Ok(noop())
            } else {
                Err(InterpError::UnknownBlockType(other))
            }
        }
    }
}

/// Evaluate a reporter/boolean block to a `Value`. Exhaustive
/// over the Reporter/Boolean half of `Command`; unreachable for
/// Stack/CShape/Cap commands (`eval_value` never calls this for
/// anything but a Reporter/Boolean-shaped block).
pub fn eval_reporter(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    use Command::*;
    match block.block_type.command {
        // Motion
        XPosition => motion::eval_x_position(interp, scriptable, block),
        YPosition => motion::eval_y_position(interp, scriptable, block),
        Direction => motion::eval_direction(interp, scriptable, block),

        // Looks
        CostumeNumber => looks::eval_costume_number(interp, scriptable, block),
        SizeReporter => looks::eval_size(interp, scriptable, block),
        BackgroundNumber => looks::eval_background_number(interp, scriptable, block),

        // Sound
        VolumeReporter => sound::eval_volume(interp, scriptable, block),
        TempoReporter => sound::eval_tempo(interp, scriptable, block),

        // Sensing
        Touching => sensing::eval_touching(interp, scriptable, block),
        TouchingColor => sensing::eval_touching_color(interp, scriptable, block),
        ColorIsTouchingColor => sensing::eval_color_is_touching_color(interp, scriptable, block),
        AnswerReporter => sensing::eval_answer(interp, scriptable, block),
        MouseX => sensing::eval_mouse_x(interp, scriptable, block),
        MouseY => sensing::eval_mouse_y(interp, scriptable, block),
        MouseDown => sensing::eval_mouse_down(interp, scriptable, block),
        KeyPressed => sensing::eval_key_pressed(interp, scriptable, block),
        DistanceTo => sensing::eval_distance_to(interp, scriptable, block),
        TimerReporter => sensing::eval_timer(interp, scriptable, block),
        AttributeOf => sensing::eval_attribute_of(interp, scriptable, block),
        Loudness => sensing::eval_loudness(interp, scriptable, block),

        // Operators
        Add => operators::eval_add(interp, scriptable, block),
        Sub => operators::eval_sub(interp, scriptable, block),
        Mul => operators::eval_mul(interp, scriptable, block),
        Div => operators::eval_div(interp, scriptable, block),
        Mod => operators::eval_mod(interp, scriptable, block),
        PickRandom => operators::eval_pick_random(interp, scriptable, block),
        Eq => operators::eval_eq(interp, scriptable, block),
        Lt => operators::eval_lt(interp, scriptable, block),
        Gt => operators::eval_gt(interp, scriptable, block),
        And => operators::eval_and(interp, scriptable, block),
        Or => operators::eval_or(interp, scriptable, block),
        Not => operators::eval_not(interp, scriptable, block),
        Join => operators::eval_join(interp, scriptable, block),
        LetterOf => operators::eval_letter_of(interp, scriptable, block),
        StringLength => operators::eval_string_length(interp, scriptable, block),
        RoundOp => operators::eval_round(interp, scriptable, block),
        ComputeFunctionOf => operators::eval_compute_function_of(interp, scriptable, block),

        // Variables
        VarReporter => variables::eval_var(interp, scriptable, block),

        // Lists
        ListReporter => lists::eval_list(interp, scriptable, block),
        ItemOfList => lists::eval_item_of_list(interp, scriptable, block),
        LineCountOfList => lists::eval_line_count_of_list(interp, scriptable, block),
        ListContains => lists::eval_list_contains(interp, scriptable, block),

        other => Err(InterpError::UnknownBlockType(other)),
    }
}
