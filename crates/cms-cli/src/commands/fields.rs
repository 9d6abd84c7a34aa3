//! Field commands

use cms_forms::{FieldPatch, MoveDirection};

use super::{check_field_index, Context};
use crate::FieldCommands;

pub async fn handle(action: FieldCommands, ctx: &Context) -> anyhow::Result<()> {
    match action {
        FieldCommands::Add { form_id, label, field_type, placeholder, required } => {
            let mut form = ctx.open_form(&form_id).await?;
            form.add_field_with(
                FieldPatch::new()
                    .label(label)
                    .field_type(field_type)
                    .placeholder(placeholder)
                    .required(required),
            );
            ctx.save_and_show(&form).await
        }
        FieldCommands::Update {
            form_id,
            index,
            label,
            name,
            field_type,
            placeholder,
            clear_placeholder,
            required,
            active,
        } => {
            let mut form = ctx.open_form(&form_id).await?;
            check_field_index(&form, index)?;

            let patch = FieldPatch {
                label,
                name,
                field_type,
                placeholder: if clear_placeholder { Some(None) } else { placeholder.map(Some) },
                required,
                is_active: active,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to change");
            }
            form.update_field(index, patch);
            ctx.save_and_show(&form).await
        }
        FieldCommands::Remove { form_id, index } => {
            let mut form = ctx.open_form(&form_id).await?;
            check_field_index(&form, index)?;
            let removed = form.remove_field(index);
            tracing::debug!(name = removed.name(), "field removed");
            ctx.save_and_show(&form).await
        }
        FieldCommands::Move { form_id, index, up, down: _ } => {
            let mut form = ctx.open_form(&form_id).await?;
            check_field_index(&form, index)?;
            let direction = if up { MoveDirection::Up } else { MoveDirection::Down };
            if !form.move_field(index, direction) {
                println!("field #{} is already at the {}", index, if up { "top" } else { "bottom" });
                return Ok(());
            }
            ctx.save_and_show(&form).await
        }
    }
}
