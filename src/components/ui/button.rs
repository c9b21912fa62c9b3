use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium transition-all disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 shrink-0 [&_svg]:shrink-0 outline-none focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-[3px] hover:cursor-pointer active:scale-[0.98] touch-manipulation [-webkit-tap-highlight-color:transparent] select-none",
        variants: {
            variant: {
                // Submit in add mode.
                Default: "bg-zinc-900 text-white shadow-xs hover:bg-zinc-800",
                // Submit in update mode.
                Success: "bg-[#388E3C] text-white shadow-xs hover:bg-[#2E7D32]",
                Destructive: "bg-destructive text-white shadow-xs hover:bg-destructive/90 focus-visible:ring-destructive/20",
                Outline: "border bg-transparent shadow-xs hover:bg-zinc-100",
                // Row remove control.
                Ghost: "text-red-600 hover:bg-red-50",
            },
            size: {
                Default: "h-9 px-4 py-2 has-[>svg]:px-3",
                Sm: "h-8 rounded-md gap-1.5 px-3 has-[>svg]:px-2.5",
                Icon: "size-8",
            }
        },
        component: {
            element: button
        }
    }
}
